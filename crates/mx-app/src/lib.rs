//! Shared application service layer for mixsense.
//!
//! This crate gives the CLI (and any other frontend) one interface over the
//! engine: case files, the analysis session, and the conversions from case
//! data into typed system records.

pub mod case;
pub mod case_service;
pub mod context;
pub mod error;

pub use case::{CaseFile, ImpellerDef, OperatingDef, RangeDef, ReactorDef, SummaryDef};
pub use case_service::{
    ReactorSummary, list_reactors, load_case, load_case_json, parse_case_yaml, save_case,
    save_case_json, validate_case,
};
pub use context::{AnalysisContext, LatestSweep, SweepData};
pub use error::{AppError, AppResult};
