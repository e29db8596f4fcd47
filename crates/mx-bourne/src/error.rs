//! Protocol errors. Every variant leaves the protocol unchanged.

use crate::stage::Stage;
use mx_analysis::AnalysisError;
use thiserror::Error;

pub type BourneResult<T> = Result<T, BourneError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BourneError {
    /// Action not allowed in the current phase (completed stage, missing
    /// prerequisite).
    #[error("Stage {stage} gate: {reason}")]
    StageGate { stage: Stage, reason: &'static str },

    #[error("Stage {stage}: KPI missing for row '{row}'")]
    MissingKpi { stage: Stage, row: String },

    #[error("KPI is not a number: '{text}'")]
    InvalidKpi { text: String },

    #[error("Invalid design input: {what}")]
    InvalidDesign { what: &'static str },

    #[error(transparent)]
    Evaluation(#[from] AnalysisError),
}

impl BourneError {
    pub fn gate(stage: Stage, reason: &'static str) -> Self {
        Self::StageGate { stage, reason }
    }
}
