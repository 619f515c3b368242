use std::collections::BTreeMap;
use std::sync::Arc;

use mf1_i18n_core::{
    Artifact, CompiledMessage, FormatBackend, FormatterArg, MessageSet, PluralRule,
    PluralRuleProvider, Value,
};
use mf1_i18n_runtime::{BasicFormatBackend, ExportTarget};
use tracing::debug;

use crate::assembler::{Assembled, assemble};
use crate::compiler::{CompileContext, CompileOptions, compile_message};
use crate::config::CompilerConfig;
use crate::error::{CompileError, CompileResult};
use crate::locale::{LocaleResolver, Locales};
use crate::message_set::{MessageSource, RESERVED_KEY};
use crate::parser::parse_message;
use crate::registry::FormatterRegistry;

/// A frozen compiler: locales, formatters and flags are fixed at build time,
/// so artifacts compiled earlier never change behavior.
#[derive(Debug, Clone)]
pub struct MessageFormat {
    resolver: LocaleResolver,
    registry: FormatterRegistry,
    plural_key_checks: bool,
    options: CompileOptions,
}

impl MessageFormat {
    pub fn builder(provider: Arc<dyn PluralRuleProvider>) -> MessageFormatBuilder {
        MessageFormatBuilder::new(provider)
    }

    pub fn new(provider: Arc<dyn PluralRuleProvider>) -> CompileResult<Self> {
        Self::builder(provider).build()
    }

    /// Compiles one pattern for the default locale.
    pub fn compile(&self, pattern: &str) -> CompileResult<CompiledMessage> {
        let locale = self.resolver.resolve_for_compile(None)?;
        self.compile_pattern(pattern, &locale)
    }

    pub fn compile_for(&self, pattern: &str, locale: &str) -> CompileResult<CompiledMessage> {
        let locale = self.resolver.resolve_for_compile(Some(locale))?;
        self.compile_pattern(pattern, &locale)
    }

    /// Compiles a pattern or a keyed tree of them. Keys naming a declared
    /// locale switch their whole subtree to that locale.
    pub fn compile_set(&self, source: &MessageSource, locale: Option<&str>) -> CompileResult<Artifact> {
        let locale = self.resolver.resolve_for_compile(locale)?;
        match source {
            MessageSource::Pattern(pattern) => {
                self.compile_pattern(pattern, &locale).map(Artifact::Message)
            }
            MessageSource::Group(entries) => {
                if entries.contains_key(RESERVED_KEY) {
                    return Err(CompileError::ReservedKey(RESERVED_KEY.to_string()));
                }
                let set = self.compile_group(entries, &locale)?;
                debug!(locale = %locale, entries = set.len(), "compiled message set");
                Ok(Artifact::Set(set))
            }
        }
    }

    /// Compiles and assembles in one step.
    pub fn compile_module(
        &self,
        source: &MessageSource,
        locale: Option<&str>,
        target: Option<&ExportTarget>,
    ) -> CompileResult<Assembled> {
        let artifact = self.compile_set(source, locale)?;
        assemble(artifact, target)
    }

    /// The plural rule a locale resolves to, with its declared categories.
    pub fn resolve_locale(&self, locale: &str) -> CompileResult<PluralRule> {
        self.resolver.resolve(locale, true)
    }

    pub fn default_locale(&self) -> &str {
        self.resolver.default_locale()
    }

    pub fn locales(&self) -> &[String] {
        self.resolver.declared()
    }

    pub fn registry(&self) -> &FormatterRegistry {
        &self.registry
    }

    fn compile_group(
        &self,
        entries: &BTreeMap<String, MessageSource>,
        locale: &str,
    ) -> CompileResult<MessageSet> {
        let mut set = MessageSet::new();
        for (key, source) in entries {
            let locale = if self.resolver.is_declared(key) {
                key.as_str()
            } else {
                locale
            };
            let artifact = match source {
                MessageSource::Pattern(pattern) => {
                    Artifact::Message(self.compile_pattern(pattern, locale)?)
                }
                MessageSource::Group(children) => {
                    Artifact::Set(self.compile_group(children, locale)?)
                }
            };
            set.insert(key.clone(), artifact);
        }
        Ok(set)
    }

    fn compile_pattern(&self, pattern: &str, locale: &str) -> CompileResult<CompiledMessage> {
        let rule = self.resolver.resolve(locale, self.plural_key_checks)?;
        let message = parse_message(pattern)?;
        let context = CompileContext {
            locale,
            rule: &rule,
            registry: &self.registry,
            options: self.options,
        };
        let compiled = compile_message(&message, &context)?;
        debug!(locale, nodes = compiled.nodes().len(), "compiled message");
        Ok(compiled)
    }
}

/// Collects configuration before anything is compiled.
pub struct MessageFormatBuilder {
    provider: Arc<dyn PluralRuleProvider>,
    config: CompilerConfig,
    locales: Option<Locales>,
    custom_rules: BTreeMap<String, PluralRule>,
    registry: FormatterRegistry,
    backend: Option<Arc<dyn FormatBackend>>,
}

impl MessageFormatBuilder {
    pub fn new(provider: Arc<dyn PluralRuleProvider>) -> Self {
        Self {
            provider,
            config: CompilerConfig::default(),
            locales: None,
            custom_rules: BTreeMap::new(),
            registry: FormatterRegistry::new(),
            backend: None,
        }
    }

    pub fn config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the locale list from the config.
    pub fn locales(mut self, locales: Locales) -> Self {
        self.locales = Some(locales);
        self
    }

    /// Adds a caller-supplied rule; any such rule puts the builder in
    /// custom-locale mode.
    pub fn custom_rule(mut self, locale: impl Into<String>, rule: PluralRule) -> Self {
        self.custom_rules.insert(locale.into(), rule);
        self
    }

    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.config.default_locale = locale.into();
        self
    }

    pub fn plural_key_checks(mut self, enabled: bool) -> Self {
        self.config.plural_key_checks = enabled;
        self
    }

    pub fn strict_number_sign(mut self, enabled: bool) -> Self {
        self.config.strict_number_sign = enabled;
        self
    }

    pub fn bidi_support(mut self, enabled: bool) -> Self {
        self.config.bidi_support = enabled;
        self
    }

    pub fn builtin_formatters(mut self, enabled: bool) -> Self {
        self.config.builtin_formatters = enabled;
        self
    }

    /// Backend for the built-in formatters; defaults to `BasicFormatBackend`.
    pub fn format_backend(mut self, backend: Arc<dyn FormatBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn formatter(
        mut self,
        name: impl Into<String>,
        func: impl Fn(&Value, &str, Option<&FormatterArg>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.registry.register(name, func);
        self
    }

    pub fn build(self) -> CompileResult<MessageFormat> {
        let Self {
            provider,
            config,
            locales,
            custom_rules,
            mut registry,
            backend,
        } = self;
        let locales = match locales {
            Some(locales) => locales,
            None if !custom_rules.is_empty() => Locales::Custom(custom_rules),
            None => Locales::from_list(&config.locales),
        };
        let resolver = LocaleResolver::new(provider, locales, &config.default_locale)?;
        if config.builtin_formatters {
            registry.enable_builtins(backend.unwrap_or_else(|| Arc::new(BasicFormatBackend)));
        }
        debug!(
            locales = ?resolver.declared(),
            default_locale = resolver.default_locale(),
            builtins = registry.builtins_enabled(),
            "built message format"
        );
        Ok(MessageFormat {
            resolver,
            registry,
            plural_key_checks: config.plural_key_checks,
            options: CompileOptions {
                strict_number_sign: config.strict_number_sign,
                bidi_support: config.bidi_support,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mf1_i18n_core::{Args, PluralCategory, PluralRule};
    use mf1_i18n_runtime::BasicPluralRules;

    use super::MessageFormat;
    use crate::config::CompilerConfig;
    use crate::error::CompileError;
    use crate::locale::Locales;
    use crate::message_set::MessageSource;

    fn en() -> MessageFormat {
        MessageFormat::new(Arc::new(BasicPluralRules)).expect("build")
    }

    #[test]
    fn compiles_with_default_locale() {
        let mf = en();
        assert_eq!(mf.default_locale(), "en");
        let message = mf.compile("{n, plural, one{# file} other{# files}}").expect("compile");
        assert_eq!(message.locale(), "en");
        assert_eq!(message.format(&Args::new().with("n", 1)).expect("format"), "1 file");
    }

    #[test]
    fn config_drives_builder_defaults() {
        let config = CompilerConfig {
            locales: vec!["fr".to_string()],
            builtin_formatters: true,
            ..CompilerConfig::default()
        };
        let mf = MessageFormat::builder(Arc::new(BasicPluralRules))
            .config(config)
            .build()
            .expect("build");
        assert_eq!(mf.default_locale(), "fr");
        assert!(mf.registry().builtins_enabled());
        let message = mf.compile("{n, plural, one{un} other{plusieurs}}").expect("compile");
        assert_eq!(message.format(&Args::new().with("n", 0)).expect("format"), "un");
        assert!(matches!(
            mf.compile_for("{x}", "en"),
            Err(CompileError::LocaleNotFound(_))
        ));
    }

    #[test]
    fn custom_rules_replace_the_provider() {
        let rule = PluralRule::new("tiny", |n, _| {
            if n < 10.0 {
                PluralCategory::Few
            } else {
                PluralCategory::Other
            }
        })
        .with_categories(&[PluralCategory::Few, PluralCategory::Other], &[PluralCategory::Other]);
        let mf = MessageFormat::builder(Arc::new(BasicPluralRules))
            .custom_rule("tiny", rule)
            .build()
            .expect("build");
        assert_eq!(mf.default_locale(), "tiny");
        let message = mf.compile("{n, plural, few{some} other{many}}").expect("compile");
        assert_eq!(message.format(&Args::new().with("n", 3)).expect("format"), "some");
        assert!(matches!(
            mf.compile("{n, plural, one{x} other{y}}"),
            Err(CompileError::InvalidPluralKey { .. })
        ));
    }

    #[test]
    fn locale_keys_reroot_subtrees() {
        let mf = MessageFormat::builder(Arc::new(BasicPluralRules))
            .locales(Locales::Multiple(vec!["en".to_string(), "fr".to_string()]))
            .build()
            .expect("build");
        let source = MessageSource::group([
            (
                "en",
                MessageSource::group([("n", "{n, plural, one{one} other{other}}")]),
            ),
            (
                "fr",
                MessageSource::group([("n", "{n, plural, one{one} other{other}}")]),
            ),
        ]);
        let artifact = mf.compile_set(&source, None).expect("compile");
        let set = artifact.as_set().expect("set");
        let args = Args::new().with("n", 0);
        assert_eq!(set.format(&["en", "n"], &args).expect("en"), "other");
        assert_eq!(set.format(&["fr", "n"], &args).expect("fr"), "one");
        let fr = set.lookup(&["fr", "n"]).and_then(|a| a.as_message()).expect("fr");
        assert_eq!(fr.locale(), "fr");
    }

    #[test]
    fn rejects_reserved_top_level_key() {
        let source = MessageSource::group([("toString", "x"), ("ok", "y")]);
        assert!(matches!(
            en().compile_set(&source, None),
            Err(CompileError::ReservedKey(_))
        ));
        let nested = MessageSource::group([("inner", MessageSource::group([("toString", "x")]))]);
        assert!(en().compile_set(&nested, None).is_ok());
    }

    #[test]
    fn parse_errors_are_reported_without_partial_results() {
        let source = MessageSource::group([("good", "fine"), ("bad", "{oops")]);
        assert!(matches!(
            en().compile_set(&source, None),
            Err(CompileError::Parse(_))
        ));
    }
}
