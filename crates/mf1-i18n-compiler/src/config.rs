use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CompileResult;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Used when no locale is declared and a compile names none.
    pub default_locale: String,
    /// Empty resolves lazily, one entry pins a single locale.
    pub locales: Vec<String>,
    pub plural_key_checks: bool,
    pub strict_number_sign: bool,
    pub bidi_support: bool,
    pub builtin_formatters: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales: Vec::new(),
            plural_key_checks: true,
            strict_number_sign: false,
            bidi_support: false,
            builtin_formatters: false,
        }
    }
}

pub fn load_config(path: &Path) -> CompileResult<CompilerConfig> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn load_config_or_default(path: &Path) -> CompileResult<CompilerConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(CompilerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{CompilerConfig, load_config, load_config_or_default};
    use crate::error::CompileError;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("mf1_i18n_{name}_{nanos}.toml"));
        path
    }

    #[test]
    fn uses_default_when_missing() {
        let path = temp_path("missing");
        let config = load_config_or_default(&path).expect("config");
        assert_eq!(config, CompilerConfig::default());
        assert_eq!(config.default_locale, "en");
        assert!(config.plural_key_checks);
    }

    #[test]
    fn loads_partial_file() {
        let path = temp_path("config");
        let contents = r#"
locales = ["en", "fr"]
strict_number_sign = true
builtin_formatters = true
"#;
        fs::write(&path, contents).expect("write");
        let config = load_config_or_default(&path).expect("config");
        assert_eq!(config.locales, vec!["en", "fr"]);
        assert!(config.strict_number_sign);
        assert!(config.builtin_formatters);
        assert!(!config.bidi_support);
        assert_eq!(config.default_locale, "en");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn reports_invalid_toml() {
        let path = temp_path("invalid");
        fs::write(&path, "plural_key_checks = \"yes\"").expect("write");
        assert!(matches!(load_config(&path), Err(CompileError::Config(_))));
        fs::remove_file(&path).ok();
    }
}
