//! System description errors.

use mx_core::MxError;
use mx_correlations::CorrelationError;
use thiserror::Error;

pub type SystemResult<T> = Result<T, SystemError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SystemError {
    /// A value the user has to supply is absent.
    #[error("Missing input: {what}")]
    MissingInput { what: String },

    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Correlation(#[from] CorrelationError),
}

impl SystemError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingInput { what: what.into() }
    }
}

impl From<MxError> for SystemError {
    fn from(err: MxError) -> Self {
        match err {
            MxError::NonFinite { what, value } | MxError::NonPhysical { what, value } => {
                SystemError::NonPhysical { what, value }
            }
            MxError::InvalidArg { what } | MxError::Invariant { what } => {
                SystemError::InvalidArg { what }
            }
        }
    }
}
