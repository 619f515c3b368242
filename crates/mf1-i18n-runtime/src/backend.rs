use mf1_i18n_core::{FormatBackend, FormatterArg, Value, format_number};

/// Locale-agnostic stand-in for a host internationalization API.
///
/// `number` understands the `integer` and `percent` styles; dates and times
/// are rendered as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicFormatBackend;

impl FormatBackend for BasicFormatBackend {
    fn format_number(&self, value: &Value, _locale: &str, style: Option<&FormatterArg>) -> String {
        let Some(number) = value.as_number() else {
            return value.render();
        };
        match style.and_then(FormatterArg::first) {
            Some("integer") => format_number(number.round()),
            Some("percent") => format!("{}%", format_number((number * 100.0).round())),
            _ => format_number(number),
        }
    }

    fn format_date(&self, value: &Value, _locale: &str, _style: Option<&FormatterArg>) -> String {
        value.render()
    }

    fn format_time(&self, value: &Value, _locale: &str, _style: Option<&FormatterArg>) -> String {
        value.render()
    }
}

#[cfg(test)]
mod tests {
    use mf1_i18n_core::{FormatBackend, FormatterArg, Value};

    use super::BasicFormatBackend;

    #[test]
    fn formats_number_styles() {
        let backend = BasicFormatBackend;
        let percent = FormatterArg::Single("percent".to_string());
        let integer = FormatterArg::Single("integer".to_string());
        assert_eq!(backend.format_number(&Value::Num(0.25), "en", Some(&percent)), "25%");
        assert_eq!(backend.format_number(&Value::Num(2.6), "en", Some(&integer)), "3");
        assert_eq!(backend.format_number(&Value::from("1.5"), "en", None), "1.5");
        assert_eq!(backend.format_number(&Value::from("n/a"), "en", None), "n/a");
    }

    #[test]
    fn passes_dates_through() {
        let backend = BasicFormatBackend;
        assert_eq!(backend.format_date(&Value::Num(86400.0), "en", None), "86400");
        assert_eq!(backend.format_time(&Value::from("12:00"), "en", None), "12:00");
    }
}
