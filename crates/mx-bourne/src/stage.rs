//! Stages and their designed condition tables.
//!
//! Each stage varies one thing around the protocol centerpoint:
//!
//! ```text
//! Stage 1  agitation      N_low = round((N³/F)^(1/3)), N_high = round((F·N³)^(1/3))
//! Stage 2  feed rate      Q/F', Q, F'·Q
//! Stage 3  feed location  Surface (reference), Sub-surface, Impeller Zone
//! ```
//!
//! Agitation and volume stay at the centerpoint in every row.

use crate::error::{BourneError, BourneResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    StirSpeed,
    FeedRate,
    FeedLocation,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Self::StirSpeed, Self::FeedRate, Self::FeedLocation];

    /// 1-based step number.
    pub fn number(self) -> usize {
        match self {
            Self::StirSpeed => 1,
            Self::FeedRate => 2,
            Self::FeedLocation => 3,
        }
    }

    pub fn from_number(n: usize) -> Option<Self> {
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    fn index(self) -> usize {
        self.number() - 1
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::StirSpeed => "Stir Speed Sensitivity",
            Self::FeedRate => "Feed Rate Sensitivity",
            Self::FeedLocation => "Feed Location Sensitivity",
        }
    }

    /// Label of the stage verdict. Labels only; the decision rule is the
    /// same for every stage.
    pub fn verdict(self, sensitive: bool) -> &'static str {
        match (self, sensitive) {
            (Self::StirSpeed, true) => "Mixing Sensitive",
            (Self::StirSpeed, false) => "Not Mixing Sensitive",
            (Self::FeedRate, true) => "Meso-/Macromixing Sensitive",
            (Self::FeedRate, false) => "Micromixing Sensitive",
            (Self::FeedLocation, true) => "Mesomixing Sensitive",
            (Self::FeedLocation, false) => "Macromixing Sensitive",
        }
    }

    pub fn recommendation(self, sensitive: bool) -> &'static str {
        match (self, sensitive) {
            (Self::StirSpeed, true) => {
                "KPI is sensitive to stir speed. Process is mixing sensitive. Proceed to Step 2."
            }
            (Self::StirSpeed, false) => {
                "KPI is not sensitive to stir speed. Exit the Bourne protocol."
            }
            (Self::FeedRate, true) => {
                "KPI is sensitive to feed rate. Process is meso- or macromixing sensitive. Proceed to Step 3."
            }
            (Self::FeedRate, false) => {
                "KPI is not sensitive to feed rate. Process is micromixing sensitive."
            }
            (Self::FeedLocation, true) => {
                "KPI is sensitive to feed location. Process is mesomixing sensitive."
            }
            (Self::FeedLocation, false) => {
                "KPI is not sensitive to feed location. Process is macromixing sensitive."
            }
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Position of a row in the design; `Center` is the reference KPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Low,
    Center,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedLocation {
    Surface,
    SubSurface,
    ImpellerZone,
}

impl fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface => write!(f, "Surface"),
            Self::SubSurface => write!(f, "Sub-surface"),
            Self::ImpellerZone => write!(f, "Impeller Zone"),
        }
    }
}

/// Agitation and volume held fixed across a stage's rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centerpoint {
    pub agitation_rpm: f64,
    pub volume_l: f64,
}

impl Centerpoint {
    pub fn new(agitation_rpm: f64, volume_l: f64) -> BourneResult<Self> {
        if !(agitation_rpm.is_finite() && agitation_rpm > 0.0) {
            return Err(BourneError::InvalidDesign {
                what: "centerpoint agitation must be positive",
            });
        }
        if !(volume_l.is_finite() && volume_l > 0.0) {
            return Err(BourneError::InvalidDesign {
                what: "centerpoint volume must be positive",
            });
        }
        Ok(Self {
            agitation_rpm,
            volume_l,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRow {
    pub label: String,
    pub level: Level,
    pub agitation_rpm: f64,
    pub volume_l: f64,
    /// Stage 2 only [kg/h]
    pub feed_rate_kg_h: Option<f64>,
    /// Stage 3 only
    pub feed_location: Option<FeedLocation>,
    /// Measured by the user; empty until entered.
    pub kpi: Option<f64>,
}

impl ConditionRow {
    fn at(label: String, level: Level, cp: Centerpoint) -> Self {
        Self {
            label,
            level,
            agitation_rpm: cp.agitation_rpm,
            volume_l: cp.volume_l,
            feed_rate_kg_h: None,
            feed_location: None,
            kpi: None,
        }
    }
}

/// Three designed rows of one stage, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionTable {
    pub stage: Stage,
    rows: Vec<ConditionRow>,
}

impl ConditionTable {
    pub fn rows(&self) -> &[ConditionRow] {
        &self.rows
    }

    pub fn row(&self, level: Level) -> Option<&ConditionRow> {
        self.rows.iter().find(|r| r.level == level)
    }

    pub(crate) fn set_kpi(&mut self, level: Level, kpi: Option<f64>) -> BourneResult<()> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.level == level)
            .ok_or(BourneError::InvalidDesign {
                what: "no row at that level",
            })?;
        row.kpi = kpi;
        Ok(())
    }

    /// KPI values as `(low, center, high)`.
    ///
    /// # Errors
    /// Any cell is still empty.
    pub fn kpis(&self) -> BourneResult<(f64, f64, f64)> {
        let get = |level| -> BourneResult<f64> {
            let row = self.row(level).ok_or(BourneError::InvalidDesign {
                what: "no row at that level",
            })?;
            row.kpi.ok_or_else(|| BourneError::MissingKpi {
                stage: self.stage,
                row: row.label.clone(),
            })
        };
        Ok((get(Level::Low)?, get(Level::Center)?, get(Level::High)?))
    }
}

fn check_factor(factor: f64) -> BourneResult<()> {
    if !(factor.is_finite() && factor > 1.0) {
        return Err(BourneError::InvalidDesign {
            what: "design factor must be greater than 1",
        });
    }
    Ok(())
}

/// Stage 1: equal-P/V steps of `pv_factor` around the centerpoint speed.
pub fn design_stir_speed(cp: Centerpoint, pv_factor: f64) -> BourneResult<ConditionTable> {
    check_factor(pv_factor)?;
    let n3 = cp.agitation_rpm.powi(3);
    let n_low = (n3 / pv_factor).cbrt().round();
    let n_high = (pv_factor * n3).cbrt().round();

    let mut low = ConditionRow::at(format!("{} P/V", 1.0 / pv_factor), Level::Low, cp);
    low.agitation_rpm = n_low;
    let center = ConditionRow::at("P/V".to_string(), Level::Center, cp);
    let mut high = ConditionRow::at(format!("{pv_factor} P/V"), Level::High, cp);
    high.agitation_rpm = n_high;

    Ok(ConditionTable {
        stage: Stage::StirSpeed,
        rows: vec![low, center, high],
    })
}

/// Stage 2: feed rate divided and multiplied by `feed_factor`.
pub fn design_feed_rate(
    cp: Centerpoint,
    feed_rate_kg_h: f64,
    feed_factor: f64,
) -> BourneResult<ConditionTable> {
    check_factor(feed_factor)?;
    if !(feed_rate_kg_h.is_finite() && feed_rate_kg_h > 0.0) {
        return Err(BourneError::InvalidDesign {
            what: "centerpoint feed rate must be positive",
        });
    }
    let row = |label: String, level, q: f64| {
        let mut r = ConditionRow::at(label, level, cp);
        r.feed_rate_kg_h = Some(q);
        r
    };
    Ok(ConditionTable {
        stage: Stage::FeedRate,
        rows: vec![
            row(
                format!("{} Q", 1.0 / feed_factor),
                Level::Low,
                feed_rate_kg_h / feed_factor,
            ),
            row("Q".to_string(), Level::Center, feed_rate_kg_h),
            row(
                format!("{feed_factor} Q"),
                Level::High,
                feed_factor * feed_rate_kg_h,
            ),
        ],
    })
}

/// Stage 3: the three feed points; the surface feed is the reference.
pub fn design_feed_location(cp: Centerpoint) -> ConditionTable {
    let row = |loc: FeedLocation, level| {
        let mut r = ConditionRow::at(loc.to_string(), level, cp);
        r.feed_location = Some(loc);
        r
    };
    ConditionTable {
        stage: Stage::FeedLocation,
        rows: vec![
            row(FeedLocation::Surface, Level::Center),
            row(FeedLocation::SubSurface, Level::Low),
            row(FeedLocation::ImpellerZone, Level::High),
        ],
    }
}
