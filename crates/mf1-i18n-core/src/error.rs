use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    NonNumericNumberSign { arg: String, value: String },
    InvalidInput(&'static str),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::NonNumericNumberSign { arg, value } => {
                write!(f, "argument {arg} must be numeric for #, found {value:?}")
            }
            CoreError::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::CoreError;
    use alloc::string::{String, ToString};

    #[test]
    fn display_formats_number_sign() {
        let err = CoreError::NonNumericNumberSign {
            arg: String::from("count"),
            value: String::from("many"),
        };
        assert_eq!(
            err.to_string(),
            "argument count must be numeric for #, found \"many\""
        );
    }

    #[test]
    fn display_formats_invalid_input() {
        let err = CoreError::InvalidInput("oops");
        assert_eq!(err.to_string(), "invalid input: oops");
    }
}
