//! Error types for datafilter.

use thiserror::Error;

use crate::ast::Operator;

/// The main error type for filter operations.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A leaf value does not fit the shape its operator requires.
    #[error("Invalid value for '{field} {op}': expected {expected}")]
    InvalidShape {
        field: String,
        op: Operator,
        expected: &'static str,
    },

    /// Render options that cannot be honoured.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilterError {
    /// Create an invalid shape error for a leaf.
    pub fn shape(field: impl Into<String>, op: Operator, expected: &'static str) -> Self {
        Self::InvalidShape {
            field: field.into(),
            op,
            expected,
        }
    }
}

/// Result type alias for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FilterError::shape("user.id", Operator::Between, "a 2-element array");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'user.id between': expected a 2-element array"
        );
    }

    #[test]
    fn test_option_error_display() {
        let err = FilterError::InvalidOption("parameter_start_index must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Invalid option: parameter_start_index must be at least 1"
        );
    }
}
