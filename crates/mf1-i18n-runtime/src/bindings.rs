use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use mf1_i18n_core::{
    FormatBackend, Formatter, FormatterArg, FormatterId, PluralRule, PluralRuleProvider, Value,
};

use crate::error::{RuntimeError, RuntimeResult};
use crate::module::FormatterRef;

/// What the host supplies when a portable module is loaded: plural rules by
/// exact locale name, and formatters by exact name.
#[derive(Clone)]
pub struct Bindings {
    plural_rules: Arc<dyn PluralRuleProvider>,
    backend: Option<Arc<dyn FormatBackend>>,
    formatters: BTreeMap<String, Formatter>,
}

impl Bindings {
    pub fn new(plural_rules: Arc<dyn PluralRuleProvider>) -> Self {
        Self {
            plural_rules,
            backend: None,
            formatters: BTreeMap::new(),
        }
    }

    pub fn with_backend(mut self, backend: Arc<dyn FormatBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_formatter(
        mut self,
        name: impl Into<String>,
        func: impl Fn(&Value, &str, Option<&FormatterArg>) -> String + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        self.formatters
            .insert(name.clone(), Formatter::custom(name, func));
        self
    }

    pub fn plural_rule(&self, locale: &str) -> RuntimeResult<PluralRule> {
        self.plural_rules
            .plural_rule(locale)
            .ok_or_else(|| RuntimeError::MissingLocale(locale.to_string()))
    }

    pub fn formatter(&self, reference: &FormatterRef) -> RuntimeResult<Formatter> {
        match reference {
            FormatterRef::Builtin(name) => {
                let id = FormatterId::from_name(name)
                    .ok_or_else(|| RuntimeError::MissingFormatter(name.clone()))?;
                let backend = self
                    .backend
                    .as_ref()
                    .ok_or_else(|| RuntimeError::MissingFormatter(name.clone()))?;
                Ok(Formatter::builtin(id, Arc::clone(backend)))
            }
            FormatterRef::Custom(name) => self
                .formatters
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::MissingFormatter(name.clone())),
        }
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("backend", &self.backend.is_some())
            .field("formatters", &self.formatters.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
