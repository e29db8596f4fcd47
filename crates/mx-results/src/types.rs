//! Sweep bookkeeping types.

use crate::ResultsResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SweepKind {
    Sensitivity,
    Scale,
}

impl fmt::Display for SweepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensitivity => write!(f, "sensitivity"),
            Self::Scale => write!(f, "scale"),
        }
    }
}

/// Describes the most recent sweep so a later edit to its inputs can be
/// detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepManifest {
    pub fingerprint: String,
    pub kind: SweepKind,
    pub timestamp: String,
    pub rows: usize,
    pub engine_version: String,
}

impl SweepManifest {
    pub fn new(fingerprint: String, kind: SweepKind, rows: usize) -> Self {
        Self {
            fingerprint,
            kind,
            timestamp: chrono::Utc::now().to_rfc3339(),
            rows,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// True when `current` no longer matches the inputs this sweep ran on.
    pub fn is_stale(&self, current: &str) -> bool {
        self.fingerprint != current
    }

    pub fn save(&self, path: &Path) -> ResultsResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> ResultsResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staleness_follows_fingerprint() {
        let m = SweepManifest::new("abc".into(), SweepKind::Scale, 72);
        assert!(!m.is_stale("abc"));
        assert!(m.is_stale("abd"));
        assert!(chrono::DateTime::parse_from_rfc3339(&m.timestamp).is_ok());
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&SweepKind::Sensitivity).expect("json");
        assert_eq!(json, "\"sensitivity\"");
    }
}
