use std::collections::BTreeMap;
use std::sync::Arc;

use mf1_i18n_core::{LocaleId, PluralRule, PluralRuleProvider};
use tracing::{debug, trace};

use crate::error::{CompileError, CompileResult};

/// The locale declaration a `MessageFormat` is built with.
#[derive(Debug, Clone, Default)]
pub enum Locales {
    /// Resolve lazily per compile, falling back to the default locale.
    #[default]
    Default,
    /// Single-locale mode: compiling for any other locale fails.
    Single(String),
    /// Several locales selectable per compile; the first is the default.
    Multiple(Vec<String>),
    /// Caller-supplied rules that bypass the plural rule provider.
    Custom(BTreeMap<String, PluralRule>),
}

impl Locales {
    pub fn from_list(locales: &[String]) -> Self {
        match locales {
            [] => Locales::Default,
            [single] => Locales::Single(single.clone()),
            _ => Locales::Multiple(locales.to_vec()),
        }
    }
}

/// Maps locale identifiers to plural rules, walking the subtag fallback chain.
#[derive(Clone)]
pub struct LocaleResolver {
    rules: Arc<dyn PluralRuleProvider>,
    declared: Vec<String>,
    default_locale: String,
}

impl LocaleResolver {
    pub fn new(
        provider: Arc<dyn PluralRuleProvider>,
        locales: Locales,
        default_locale: &str,
    ) -> CompileResult<Self> {
        let (rules, declared): (Arc<dyn PluralRuleProvider>, Vec<String>) = match locales {
            Locales::Default => (provider, Vec::new()),
            Locales::Single(locale) => (provider, vec![locale]),
            Locales::Multiple(locales) => (provider, locales),
            Locales::Custom(map) => {
                if map.is_empty() {
                    return Err(CompileError::InvalidLocaleMapping(
                        "custom locale mapping is empty".to_string(),
                    ));
                }
                for name in map.keys() {
                    LocaleId::parse(name).map_err(|error| {
                        CompileError::InvalidLocaleMapping(format!("{name}: {error}"))
                    })?;
                }
                let declared = map.keys().cloned().collect();
                let rules: Arc<dyn PluralRuleProvider> = Arc::new(map);
                (rules, declared)
            }
        };
        let default_locale = match declared.first() {
            Some(_) if declared.iter().any(|locale| locale == default_locale) => {
                default_locale.to_string()
            }
            Some(first) => first.clone(),
            None => default_locale.to_string(),
        };
        let resolver = Self {
            rules,
            declared,
            default_locale,
        };
        for locale in &resolver.declared {
            resolver.resolve(locale, false)?;
        }
        Ok(resolver)
    }

    /// Without `strict` the rule keeps its behavior but declares no
    /// categories, which switches off key checks.
    pub fn resolve(&self, locale: &str, strict: bool) -> CompileResult<PluralRule> {
        let id = LocaleId::parse(locale)
            .map_err(|_| CompileError::LocaleNotFound(locale.to_string()))?;
        for candidate in id.fallback_chain() {
            trace!(locale, candidate, "looking up plural rules");
            if let Some(rule) = self.rules.plural_rule(candidate) {
                if candidate != locale {
                    debug!(locale, resolved = candidate, "resolved locale through fallback");
                }
                return Ok(if strict {
                    rule
                } else {
                    rule.without_categories()
                });
            }
        }
        Err(CompileError::LocaleNotFound(locale.to_string()))
    }

    /// Picks the locale a compile runs under.
    pub fn resolve_for_compile(&self, requested: Option<&str>) -> CompileResult<String> {
        match requested {
            None => Ok(self.default_locale.clone()),
            Some(locale) if self.declared.is_empty() || self.is_declared(locale) => {
                Ok(locale.to_string())
            }
            Some(locale) => Err(CompileError::LocaleNotFound(locale.to_string())),
        }
    }

    pub fn is_declared(&self, locale: &str) -> bool {
        self.declared.iter().any(|declared| declared == locale)
    }

    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }
}

impl std::fmt::Debug for LocaleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleResolver")
            .field("declared", &self.declared)
            .field("default_locale", &self.default_locale)
            .finish_non_exhaustive()
    }
}
