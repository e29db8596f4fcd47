//! The relative-deviation decision rule shared by all three stages.

use crate::error::{BourneError, BourneResult};
use crate::stage::{ConditionTable, Stage};
use mx_analysis::relative_deviation;
use serde::{Deserialize, Serialize};

/// Default relative deviation from the centerpoint KPI that counts as a
/// response.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub stage: Stage,
    pub sensitive: bool,
    pub low_deviation: f64,
    pub high_deviation: f64,
}

impl StageOutcome {
    pub fn verdict(&self) -> &'static str {
        self.stage.verdict(self.sensitive)
    }

    pub fn recommendation(&self) -> &'static str {
        self.stage.recommendation(self.sensitive)
    }
}

/// Sensitive iff either outer KPI deviates from the centerpoint KPI by
/// more than `threshold`.
///
/// # Errors
/// The centerpoint KPI is zero or not finite.
pub fn decide(
    stage: Stage,
    kpi_low: f64,
    kpi_center: f64,
    kpi_high: f64,
    threshold: f64,
) -> BourneResult<StageOutcome> {
    let low_deviation = relative_deviation(kpi_low, kpi_center)?;
    let high_deviation = relative_deviation(kpi_high, kpi_center)?;
    Ok(StageOutcome {
        stage,
        sensitive: low_deviation > threshold || high_deviation > threshold,
        low_deviation,
        high_deviation,
    })
}

pub fn decide_table(table: &ConditionTable, threshold: f64) -> BourneResult<StageOutcome> {
    let (low, center, high) = table.kpis()?;
    decide(table.stage, low, center, high, threshold)
}

/// Parse a KPI cell as typed by the user.
pub fn parse_kpi(text: &str) -> BourneResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(BourneError::InvalidKpi {
            text: text.to_string(),
        }),
    }
}
