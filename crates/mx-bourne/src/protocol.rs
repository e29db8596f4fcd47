//! The protocol state machine.
//!
//! ```text
//! NotStarted -> Stage1Active -> Stage1Done -> Stage2Active -> Stage2Done
//!            -> Stage3Active -> Stage3Done
//! any        -- Reset --> NotStarted
//! ```
//!
//! Transitions are pure: [`BourneProtocol::apply`] returns the next
//! protocol or an error, and never touches `self`. A completed stage is
//! read-only; the only way back is a full reset.

use crate::decision::{DEFAULT_THRESHOLD, StageOutcome, decide_table};
use crate::error::{BourneError, BourneResult};
use crate::stage::{
    Centerpoint, ConditionTable, Level, Stage, design_feed_location, design_feed_rate,
    design_stir_speed,
};
use serde::{Deserialize, Serialize};

/// Where Stages 2 and 3 take agitation and volume from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CenterpointPolicy {
    /// Reuse the Stage 1 centerpoint.
    #[default]
    Inherit,
    /// Accept a centerpoint when the stage begins; fall back to Stage 1's.
    Independent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BourneConfig {
    /// P/V ratio between adjacent Stage 1 rows.
    pub pv_factor: f64,
    /// Feed-rate ratio between adjacent Stage 2 rows.
    pub feed_factor: f64,
    /// Relative KPI deviation that counts as sensitive.
    pub threshold: f64,
    /// Stage 2 centerpoint feed rate when none is given [kg/h].
    pub default_feed_rate_kg_h: f64,
    pub centerpoint_policy: CenterpointPolicy,
}

impl Default for BourneConfig {
    fn default() -> Self {
        Self {
            pv_factor: 10.0,
            feed_factor: 3.0,
            threshold: DEFAULT_THRESHOLD,
            default_feed_rate_kg_h: 0.1,
            centerpoint_policy: CenterpointPolicy::Inherit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    Stage1Active,
    Stage1Done,
    Stage2Active,
    Stage2Done,
    Stage3Active,
    Stage3Done,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BeginStirSpeed {
        centerpoint: Centerpoint,
    },
    BeginFeedRate {
        feed_rate_kg_h: Option<f64>,
        centerpoint: Option<Centerpoint>,
    },
    BeginFeedLocation {
        centerpoint: Option<Centerpoint>,
    },
    SetKpi {
        stage: Stage,
        level: Level,
        value: Option<f64>,
    },
    Run {
        stage: Stage,
    },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    pub table: ConditionTable,
    pub outcome: Option<StageOutcome>,
}

impl StageRecord {
    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BourneProtocol {
    config: BourneConfig,
    centerpoint: Option<Centerpoint>,
    /// Begun stages, in order.
    stages: Vec<StageRecord>,
}

impl BourneProtocol {
    pub fn new(config: BourneConfig) -> Self {
        Self {
            config,
            centerpoint: None,
            stages: Vec::new(),
        }
    }

    pub fn config(&self) -> &BourneConfig {
        &self.config
    }

    /// Stage 1 centerpoint, once Stage 1 has begun.
    pub fn centerpoint(&self) -> Option<Centerpoint> {
        self.centerpoint
    }

    pub fn phase(&self) -> Phase {
        match self.stages.last() {
            None => Phase::NotStarted,
            Some(rec) => match (rec.table.stage, rec.is_done()) {
                (Stage::StirSpeed, false) => Phase::Stage1Active,
                (Stage::StirSpeed, true) => Phase::Stage1Done,
                (Stage::FeedRate, false) => Phase::Stage2Active,
                (Stage::FeedRate, true) => Phase::Stage2Done,
                (Stage::FeedLocation, false) => Phase::Stage3Active,
                (Stage::FeedLocation, true) => Phase::Stage3Done,
            },
        }
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageRecord> {
        self.stages.iter().find(|r| r.table.stage == stage)
    }

    pub fn is_done(&self, stage: Stage) -> bool {
        self.stage(stage).is_some_and(StageRecord::is_done)
    }

    /// Sensitivity result; false until the stage is done.
    pub fn result(&self, stage: Stage) -> bool {
        self.stage(stage)
            .and_then(|r| r.outcome)
            .is_some_and(|o| o.sensitive)
    }

    /// Whether `stage` may be begun now.
    pub fn can_begin(&self, stage: Stage) -> bool {
        self.stage(stage).is_none()
            && stage.previous().is_none_or(|prev| self.is_done(prev))
    }

    /// Whether "Run" is enabled for `stage`.
    pub fn can_run(&self, stage: Stage) -> bool {
        self.stage(stage).is_some_and(|r| !r.is_done())
    }

    /// Next protocol after `event`. On error `self` is unchanged and is
    /// still the current protocol.
    pub fn apply(&self, event: Event) -> BourneResult<Self> {
        let next = self.transition(event);
        if let Err(err) = &next {
            tracing::warn!(error = %err, phase = ?self.phase(), "bourne event rejected");
        }
        next
    }

    fn transition(&self, event: Event) -> BourneResult<Self> {
        match event {
            Event::Reset => {
                tracing::info!("bourne protocol reset");
                Ok(Self::new(self.config))
            }
            Event::BeginStirSpeed { centerpoint } => {
                self.check_begin(Stage::StirSpeed)?;
                let table = design_stir_speed(centerpoint, self.config.pv_factor)?;
                let mut next = self.clone();
                next.centerpoint = Some(centerpoint);
                next.push(table);
                Ok(next)
            }
            Event::BeginFeedRate {
                feed_rate_kg_h,
                centerpoint,
            } => {
                self.check_begin(Stage::FeedRate)?;
                let cp = self.stage_centerpoint(Stage::FeedRate, centerpoint)?;
                let q = feed_rate_kg_h.unwrap_or(self.config.default_feed_rate_kg_h);
                let table = design_feed_rate(cp, q, self.config.feed_factor)?;
                let mut next = self.clone();
                next.push(table);
                Ok(next)
            }
            Event::BeginFeedLocation { centerpoint } => {
                self.check_begin(Stage::FeedLocation)?;
                let cp = self.stage_centerpoint(Stage::FeedLocation, centerpoint)?;
                let mut next = self.clone();
                next.push(design_feed_location(cp));
                Ok(next)
            }
            Event::SetKpi {
                stage,
                level,
                value,
            } => {
                self.check_open(stage)?;
                if value.is_some_and(|v| !v.is_finite()) {
                    return Err(BourneError::InvalidKpi {
                        text: format!("{value:?}"),
                    });
                }
                let mut next = self.clone();
                next.record_mut(stage)?.table.set_kpi(level, value)?;
                Ok(next)
            }
            Event::Run { stage } => {
                self.check_open(stage)?;
                let rec = self
                    .stage(stage)
                    .ok_or(BourneError::gate(stage, "stage has not begun"))?;
                let outcome = decide_table(&rec.table, self.config.threshold)?;
                tracing::info!(
                    stage = stage.number(),
                    sensitive = outcome.sensitive,
                    verdict = outcome.verdict(),
                    "bourne stage complete"
                );
                let mut next = self.clone();
                next.record_mut(stage)?.outcome = Some(outcome);
                Ok(next)
            }
        }
    }

    fn check_begin(&self, stage: Stage) -> BourneResult<()> {
        if self.stage(stage).is_some() {
            return Err(BourneError::gate(stage, "stage has already begun"));
        }
        if let Some(prev) = stage.previous() {
            if !self.is_done(prev) {
                return Err(BourneError::gate(stage, "previous stage is not complete"));
            }
        }
        Ok(())
    }

    fn check_open(&self, stage: Stage) -> BourneResult<()> {
        match self.stage(stage) {
            None => Err(BourneError::gate(stage, "stage has not begun")),
            Some(rec) if rec.is_done() => {
                Err(BourneError::gate(stage, "completed stage is read-only"))
            }
            Some(_) => Ok(()),
        }
    }

    fn stage_centerpoint(
        &self,
        stage: Stage,
        requested: Option<Centerpoint>,
    ) -> BourneResult<Centerpoint> {
        let inherited = self
            .centerpoint
            .ok_or(BourneError::gate(stage, "Stage 1 centerpoint is not set"))?;
        match (self.config.centerpoint_policy, requested) {
            (CenterpointPolicy::Inherit, Some(_)) => Err(BourneError::InvalidDesign {
                what: "centerpoint is inherited from Stage 1 under the inherit policy",
            }),
            (CenterpointPolicy::Inherit, None) => Ok(inherited),
            (CenterpointPolicy::Independent, requested) => Ok(requested.unwrap_or(inherited)),
        }
    }

    fn push(&mut self, table: ConditionTable) {
        tracing::debug!(stage = table.stage.number(), "bourne stage designed");
        self.stages.push(StageRecord {
            table,
            outcome: None,
        });
    }

    fn record_mut(&mut self, stage: Stage) -> BourneResult<&mut StageRecord> {
        self.stages
            .iter_mut()
            .find(|r| r.table.stage == stage)
            .ok_or(BourneError::gate(stage, "stage has not begun"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp() -> Centerpoint {
        Centerpoint::new(200.0, 50.0).expect("valid")
    }

    fn with_kpis(p: BourneProtocol, stage: Stage, low: f64, center: f64, high: f64) -> BourneProtocol {
        [(Level::Low, low), (Level::Center, center), (Level::High, high)]
            .into_iter()
            .fold(p, |p, (level, v)| {
                p.apply(Event::SetKpi {
                    stage,
                    level,
                    value: Some(v),
                })
                .expect("kpi accepted")
            })
    }

    #[test]
    fn phases_advance_in_order() {
        let p = BourneProtocol::default();
        assert_eq!(p.phase(), Phase::NotStarted);
        let p = p
            .apply(Event::BeginStirSpeed { centerpoint: cp() })
            .expect("begin 1");
        assert_eq!(p.phase(), Phase::Stage1Active);
        let p = with_kpis(p, Stage::StirSpeed, 80.0, 100.0, 100.0);
        let p = p.apply(Event::Run { stage: Stage::StirSpeed }).expect("run 1");
        assert_eq!(p.phase(), Phase::Stage1Done);
        assert!(p.result(Stage::StirSpeed));
    }

    #[test]
    fn stage_two_requires_stage_one() {
        let p = BourneProtocol::default()
            .apply(Event::BeginStirSpeed { centerpoint: cp() })
            .expect("begin 1");
        let err = p
            .apply(Event::BeginFeedRate {
                feed_rate_kg_h: None,
                centerpoint: None,
            })
            .expect_err("gated");
        assert!(matches!(err, BourneError::StageGate { stage: Stage::FeedRate, .. }));
        assert!(!p.can_begin(Stage::FeedRate));
    }

    #[test]
    fn missing_kpi_leaves_stage_open() {
        let p = BourneProtocol::default()
            .apply(Event::BeginStirSpeed { centerpoint: cp() })
            .expect("begin 1")
            .apply(Event::SetKpi {
                stage: Stage::StirSpeed,
                level: Level::Center,
                value: Some(100.0),
            })
            .expect("kpi");
        let err = p.apply(Event::Run { stage: Stage::StirSpeed }).expect_err("missing");
        assert!(matches!(err, BourneError::MissingKpi { .. }));
        assert_eq!(p.phase(), Phase::Stage1Active);
        assert!(p.can_run(Stage::StirSpeed));
    }

    #[test]
    fn inherit_policy_rejects_override() {
        let p = BourneProtocol::default()
            .apply(Event::BeginStirSpeed { centerpoint: cp() })
            .expect("begin 1");
        let p = with_kpis(p, Stage::StirSpeed, 100.0, 100.0, 100.0)
            .apply(Event::Run { stage: Stage::StirSpeed })
            .expect("run 1");
        let other = Centerpoint::new(300.0, 60.0).expect("valid");
        assert!(matches!(
            p.apply(Event::BeginFeedRate {
                feed_rate_kg_h: None,
                centerpoint: Some(other),
            }),
            Err(BourneError::InvalidDesign { .. })
        ));
    }

    #[test]
    fn independent_policy_accepts_override() {
        let config = BourneConfig {
            centerpoint_policy: CenterpointPolicy::Independent,
            ..Default::default()
        };
        let p = BourneProtocol::new(config)
            .apply(Event::BeginStirSpeed { centerpoint: cp() })
            .expect("begin 1");
        let p = with_kpis(p, Stage::StirSpeed, 50.0, 100.0, 100.0)
            .apply(Event::Run { stage: Stage::StirSpeed })
            .expect("run 1");
        let other = Centerpoint::new(300.0, 60.0).expect("valid");
        let p = p
            .apply(Event::BeginFeedRate {
                feed_rate_kg_h: Some(0.5),
                centerpoint: Some(other),
            })
            .expect("begin 2");
        let rec = p.stage(Stage::FeedRate).expect("designed");
        assert!(rec.table.rows().iter().all(|r| r.agitation_rpm == 300.0));
        assert_eq!(p.centerpoint(), Some(cp()));
    }

    #[test]
    fn non_finite_kpi_is_rejected() {
        let p = BourneProtocol::default()
            .apply(Event::BeginStirSpeed { centerpoint: cp() })
            .expect("begin 1");
        assert!(p
            .apply(Event::SetKpi {
                stage: Stage::StirSpeed,
                level: Level::Low,
                value: Some(f64::NAN),
            })
            .is_err());
    }
}
