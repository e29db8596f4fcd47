//! Correlation-level errors.
//!
//! Numeric edge cases (an unsupported regime, a zero kLa) are reported through
//! sentinel values, not errors. The variants here cover tags that cannot be
//! parsed into one of the known enums.

use mx_core::MxError;
use thiserror::Error;

pub type CorrelationResult<T> = Result<T, CorrelationError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    #[error("Unknown dish type: {0}")]
    UnknownDishType(String),

    #[error("Unknown flow regime: {0}")]
    UnknownRegime(String),

    #[error("Unknown gassing system: {0}")]
    UnknownGassingSystem(String),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<CorrelationError> for MxError {
    fn from(err: CorrelationError) -> Self {
        match err {
            CorrelationError::UnknownDishType(_) => MxError::InvalidArg {
                what: "unknown dish type",
            },
            CorrelationError::UnknownRegime(_) => MxError::InvalidArg {
                what: "unknown flow regime",
            },
            CorrelationError::UnknownGassingSystem(_) => MxError::InvalidArg {
                what: "unknown gassing system",
            },
            CorrelationError::InvalidArg { what } => MxError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CorrelationError::UnknownDishType("Conical".into());
        assert!(err.to_string().contains("Conical"));
    }

    #[test]
    fn error_to_mx_error() {
        let err: MxError = CorrelationError::UnknownRegime("Plug".into()).into();
        assert!(matches!(err, MxError::InvalidArg { .. }));
    }
}
