use std::collections::BTreeMap;
use std::sync::Arc;

use mf1_i18n_core::{FormatBackend, Formatter, FormatterArg, FormatterId, Value};

/// Formatter names available to function calls, frozen when a
/// `MessageFormat` is built.
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    custom: BTreeMap<String, Formatter>,
    builtins: Option<Arc<dyn FormatBackend>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&Value, &str, Option<&FormatterArg>) -> String + Send + Sync + 'static,
    ) {
        let name = name.into();
        self.custom.insert(name.clone(), Formatter::custom(name, func));
    }

    /// Wires `number`, `date` and `time` to `backend`.
    pub fn enable_builtins(&mut self, backend: Arc<dyn FormatBackend>) {
        self.builtins = Some(backend);
    }

    pub fn builtins_enabled(&self) -> bool {
        self.builtins.is_some()
    }

    /// Custom registrations shadow the built-ins.
    pub fn resolve(&self, name: &str) -> Option<Formatter> {
        if let Some(formatter) = self.custom.get(name) {
            return Some(formatter.clone());
        }
        let backend = self.builtins.as_ref()?;
        let id = FormatterId::from_name(name)?;
        Some(Formatter::builtin(id, Arc::clone(backend)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.custom.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .field("builtins", &self.builtins.is_some())
            .finish()
    }
}
