//! mx-results: tabular outputs, CSV exchange and sweep bookkeeping.
//!
//! Provides:
//! - [`ResultTable`], a plain column/row table built from sweep results,
//!   Bourne condition tables and the mixing report, with CSV export/import
//! - The mixing report (named cases side by side)
//! - The historical kLa reference dataset reader
//! - Content fingerprints and manifests for the most recent sweep

pub mod fingerprint;
pub mod kla_reference;
pub mod report;
pub mod table;
pub mod types;

pub use fingerprint::sweep_fingerprint;
pub use kla_reference::{KlaMeasurement, KlaReference};
pub use report::{MixingReport, ReportCase};
pub use table::{Cell, ResultTable, SCALE_COLUMNS, SENSITIVITY_COLUMNS, TEXT_COLUMNS};
pub use types::{SweepKind, SweepManifest};

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed table: {0}")]
    Malformed(String),
}
