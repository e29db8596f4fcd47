//! Evaluator errors.

use mx_core::MxError;
use mx_system::SystemError;
use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The dependent evaluation must not run until this is fixed.
    #[error("Precondition failed: {what}")]
    Precondition { what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    System(#[from] SystemError),
}

impl AnalysisError {
    pub fn precondition(what: impl Into<String>) -> Self {
        Self::Precondition { what: what.into() }
    }
}

impl From<MxError> for AnalysisError {
    fn from(err: MxError) -> Self {
        AnalysisError::System(err.into())
    }
}
