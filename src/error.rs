//! Error types for recsim operations.
//!
//! Shape violations are the only runtime failure the kernels can report.
//! Zero-norm rows and empty operands are defined outcomes, not errors.

use thiserror::Error;

/// Main error type for recsim operations.
///
/// # Examples
///
/// ```
/// use recsim::error::RecsimError;
///
/// let err = RecsimError::DimensionMismatch {
///     expected: "cols=10".to_string(),
///     actual: "5".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecsimError {
    /// Operand shapes are incompatible for the requested operation.
    #[error("Matrix dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid configuration value provided.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Interaction label that does not name a known interaction kind.
    #[error("Unknown interaction kind: {0}")]
    UnknownInteraction(String),
}

impl RecsimError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: f64, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RecsimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = RecsimError::DimensionMismatch {
            expected: "100x10".to_string(),
            actual: "100x5".to_string(),
        };
        assert!(err.to_string().contains("dimension mismatch"));
        assert!(err.to_string().contains("100x10"));
        assert!(err.to_string().contains("100x5"));
    }

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = RecsimError::dimension_mismatch("cols", 100, 50);
        let msg = err.to_string();
        assert!(msg.contains("cols=100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = RecsimError::invalid_hyperparameter("max_price", -1.0, ">0");
        let msg = err.to_string();
        assert!(msg.contains("Invalid hyperparameter"));
        assert!(msg.contains("max_price"));
        assert!(msg.contains("-1"));
        assert!(msg.contains(">0"));
    }

    #[test]
    fn test_unknown_interaction_display() {
        let err = RecsimError::UnknownInteraction("wishlist".to_string());
        assert_eq!(err.to_string(), "Unknown interaction kind: wishlist");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecsimError>();
    }
}
