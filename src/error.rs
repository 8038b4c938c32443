//! Error types for that-message.
//!
//! Message synthesis never fails. Errors only come from reading source
//! text into an expression tree and from resolving a live message against
//! failure-time bindings.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The condition text could not be read as an expression.
    #[error("Parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// A placeholder names something that has no binding.
    #[error("No value bound for '{0}'")]
    Unbound(String),

    /// A placeholder has a shape the evaluator cannot compute.
    #[error("Cannot evaluate '{0}' at failure time")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_the_offset() {
        let err = Error::parse(7, "unterminated string literal");
        assert_eq!(
            err.to_string(),
            "Parse error at offset 7: unterminated string literal"
        );
    }

    #[test]
    fn unbound_error_names_the_placeholder() {
        assert_eq!(
            Error::Unbound("actual".into()).to_string(),
            "No value bound for 'actual'"
        );
    }
}
