//! Error types for the mx-app service layer.

use mx_analysis::AnalysisError;
use mx_bourne::BourneError;
use mx_system::SystemError;
use std::path::PathBuf;

/// Application error shared by every frontend.
///
/// `MissingInput` and `Precondition` are the two recoverable classes a
/// frontend reports as a warning before disabling the dependent action.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Case error: {0}")]
    Case(String),

    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write case file: {path}")]
    CaseFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case validation failed: {0}")]
    Validation(String),

    #[error("Reactor not found: {0}")]
    ReactorNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error(transparent)]
    Bourne(#[from] BourneError),

    #[error("Results error: {0}")]
    Results(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<SystemError> for AppError {
    fn from(err: SystemError) -> Self {
        match err {
            SystemError::MissingInput { what } => AppError::MissingInput(what),
            other => AppError::InvalidInput(other.to_string()),
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Precondition { what } => AppError::Precondition(what),
            AnalysisError::System(inner) => inner.into(),
            other => AppError::Analysis(other.to_string()),
        }
    }
}

impl From<mx_results::ResultsError> for AppError {
    fn from(err: mx_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_survives_conversion() {
        let e: AppError = AnalysisError::precondition("reaction rate is zero").into();
        assert!(matches!(e, AppError::Precondition(_)));

        let e: AppError = AnalysisError::System(SystemError::missing("solid density")).into();
        assert!(matches!(e, AppError::MissingInput(ref w) if w == "solid density"));
    }
}
