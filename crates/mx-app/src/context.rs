//! The analysis session: one case, its Bourne protocol, the latest sweep
//! and the report being assembled.
//!
//! Every frontend action goes through an [`AnalysisContext`]. There is no
//! global state; [`AnalysisContext::reset`] replaces the whole context.

use crate::case::CaseFile;
use crate::case_service::validate_case;
use crate::error::{AppError, AppResult};
use mx_analysis::{
    MixingSummary, PerformanceCurves, ScaleRow, SensitivityRow, SweepResult, mixing_summary,
    performance_curves, scale_sweep, sensitivity_grid,
};
use mx_bourne::{BourneProtocol, Centerpoint, Event, Phase, Stage, StageRecord};
use mx_core::units::{in_liters, in_rpm};
use mx_results::{MixingReport, ReportCase, SweepKind, SweepManifest, sweep_fingerprint};
use mx_system::{ComponentInput, OperatingPoint, ReactionRate, Reactor};
use serde::Serialize;

/// Rows of the latest sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepData {
    Sensitivity(SweepResult<SensitivityRow>),
    Scale(SweepResult<ScaleRow>),
}

/// The sweep kept by the session. A new sweep replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestSweep {
    pub manifest: SweepManifest,
    pub reactor_ids: Vec<String>,
    pub data: SweepData,
}

/// What a sweep depends on; hashed to detect stale results.
#[derive(Serialize)]
struct SweepInputs<'a> {
    reactors: Vec<&'a crate::case::ReactorDef>,
    components: &'a [ComponentInput],
    reaction: &'a Option<ReactionRate>,
    settings: &'a mx_analysis::SweepSettings,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    case: CaseFile,
    selected: Option<String>,
    bourne: BourneProtocol,
    latest_sweep: Option<LatestSweep>,
    report: MixingReport,
}

impl AnalysisContext {
    /// Start a session on a validated case.
    pub fn from_case(case: CaseFile) -> AppResult<Self> {
        validate_case(&case)?;
        let selected = case.default_reactor_id()?.to_string();
        tracing::info!(
            reactors = case.reactors.len(),
            components = case.components.len(),
            reactor = %selected,
            "session started"
        );
        Ok(Self {
            bourne: BourneProtocol::new(case.bourne),
            selected: Some(selected),
            case,
            latest_sweep: None,
            report: MixingReport::new(),
        })
    }

    /// Drop everything: case, protocol, sweep and report.
    pub fn reset(&mut self) {
        tracing::info!("session reset");
        *self = Self::default();
    }

    pub fn case(&self) -> &CaseFile {
        &self.case
    }

    pub fn selected_reactor_id(&self) -> AppResult<&str> {
        self.selected
            .as_deref()
            .ok_or_else(|| AppError::MissingInput("reactor selection".to_string()))
    }

    pub fn select_reactor(&mut self, id: &str) -> AppResult<()> {
        self.case.reactor_def(id)?;
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn reactor(&self) -> AppResult<Reactor> {
        self.case.reactor(self.selected_reactor_id()?)
    }

    pub fn operating_point(&self) -> AppResult<OperatingPoint> {
        Ok(self.case.operating_point(&self.reactor()?))
    }

    pub fn set_operating_point(&mut self, agitation_rpm: f64, volume_l: f64) -> AppResult<()> {
        if !(agitation_rpm > 0.0 && volume_l > 0.0) {
            return Err(AppError::InvalidInput(
                "agitation and volume must be positive".to_string(),
            ));
        }
        let op = self.case.operating_point.get_or_insert_with(Default::default);
        op.reactor = self.selected.clone();
        op.agitation_rpm = Some(agitation_rpm);
        op.volume_l = Some(volume_l);
        Ok(())
    }

    pub fn set_reaction(&mut self, reaction: ReactionRate) {
        self.case.reaction = Some(reaction);
    }

    pub fn set_components(&mut self, components: Vec<ComponentInput>) {
        self.case.components = components;
    }

    fn reaction(&self) -> AppResult<&ReactionRate> {
        self.case
            .reaction
            .as_ref()
            .ok_or_else(|| AppError::MissingInput("reaction rate".to_string()))
    }

    pub fn summary(&self) -> AppResult<MixingSummary> {
        let reactor = self.reactor()?;
        let mixture = self.case.mixture()?;
        let op = self.case.operating_point(&reactor);
        Ok(mixing_summary(
            &reactor,
            &mixture,
            &op,
            self.case.reaction.as_ref(),
            &self.case.summary_options(),
        )?)
    }

    /// Re and mixing time over the selected reactor's agitation range.
    pub fn performance_curves(&self) -> AppResult<PerformanceCurves> {
        let reactor = self.reactor()?;
        let mixture = self.case.mixture()?;
        let op = self.case.operating_point(&reactor);
        let env = &reactor.envelope;
        Ok(performance_curves(
            &reactor,
            mixture.properties(),
            op.volume,
            in_rpm(env.agitation_min),
            in_rpm(env.agitation_max),
        )?)
    }

    fn fingerprint(&self, reactor_ids: &[&str], kind: SweepKind) -> AppResult<String> {
        let reactors = reactor_ids
            .iter()
            .map(|id| self.case.reactor_def(id))
            .collect::<AppResult<Vec<_>>>()?;
        let inputs = SweepInputs {
            reactors,
            components: &self.case.components,
            reaction: &self.case.reaction,
            settings: &self.case.sweep,
        };
        Ok(sweep_fingerprint(&inputs, kind))
    }

    fn keep_sweep(
        &mut self,
        kind: SweepKind,
        reactor_ids: &[&str],
        data: SweepData,
        rows: usize,
    ) -> AppResult<()> {
        let fingerprint = self.fingerprint(reactor_ids, kind)?;
        tracing::debug!(%kind, rows, fingerprint = %fingerprint, "sweep stored");
        self.latest_sweep = Some(LatestSweep {
            manifest: SweepManifest::new(fingerprint, kind, rows),
            reactor_ids: reactor_ids.iter().map(|id| id.to_string()).collect(),
            data,
        });
        Ok(())
    }

    /// Sensitivity grid on the selected reactor; replaces the latest sweep.
    pub fn run_sensitivity(&mut self) -> AppResult<SweepResult<SensitivityRow>> {
        let reactor = self.reactor()?;
        let mixture = self.case.mixture()?;
        let reaction = self.reaction()?;
        let result = sensitivity_grid(&reactor, mixture.properties(), reaction, &self.case.sweep)?;
        self.keep_sweep(
            SweepKind::Sensitivity,
            &[reactor.id.as_str()],
            SweepData::Sensitivity(result.clone()),
            result.len(),
        )?;
        Ok(result)
    }

    /// Scale sweep over the given reactors; replaces the latest sweep.
    pub fn run_scale(&mut self, reactor_ids: &[&str]) -> AppResult<SweepResult<ScaleRow>> {
        if reactor_ids.is_empty() {
            return Err(AppError::Precondition(
                "no reactors selected for scale sweep".to_string(),
            ));
        }
        let reactors = reactor_ids
            .iter()
            .map(|id| self.case.reactor(id))
            .collect::<AppResult<Vec<_>>>()?;
        let refs: Vec<&Reactor> = reactors.iter().collect();
        let mixture = self.case.mixture()?;
        let reaction = self.reaction()?;
        let result = scale_sweep(&refs, mixture.properties(), reaction, &self.case.sweep)?;
        self.keep_sweep(
            SweepKind::Scale,
            reactor_ids,
            SweepData::Scale(result.clone()),
            result.len(),
        )?;
        Ok(result)
    }

    pub fn latest_sweep(&self) -> Option<&LatestSweep> {
        self.latest_sweep.as_ref()
    }

    /// Whether the latest sweep no longer matches the case; `None` without
    /// a sweep.
    pub fn is_sweep_stale(&self) -> Option<bool> {
        let sweep = self.latest_sweep.as_ref()?;
        let ids: Vec<&str> = sweep.reactor_ids.iter().map(String::as_str).collect();
        // A reactor removed from the case makes the sweep stale too.
        Some(
            self.fingerprint(&ids, sweep.manifest.kind)
                .map_or(true, |fp| sweep.manifest.is_stale(&fp)),
        )
    }

    pub fn bourne(&self) -> &BourneProtocol {
        &self.bourne
    }

    /// Apply one protocol event. A rejected event leaves the protocol as
    /// it was.
    pub fn apply_bourne(&mut self, event: Event) -> AppResult<Phase> {
        self.bourne = self.bourne.apply(event)?;
        Ok(self.bourne.phase())
    }

    /// Stage 1 centerpoint: the envelope midpoint unless overridden.
    pub fn default_centerpoint(
        &self,
        agitation_rpm: Option<f64>,
        volume_l: Option<f64>,
    ) -> AppResult<Centerpoint> {
        let env = self.reactor()?.envelope;
        Ok(Centerpoint::new(
            agitation_rpm.unwrap_or_else(|| in_rpm(env.mid_agitation())),
            volume_l.unwrap_or_else(|| in_liters(env.mid_volume())),
        )?)
    }

    /// Fill a stage's KPIs in table row order and run its decision.
    pub fn complete_stage(&mut self, stage: Stage, kpis: [f64; 3]) -> AppResult<&StageRecord> {
        let levels: Vec<_> = self
            .bourne
            .stage(stage)
            .ok_or(mx_bourne::BourneError::gate(stage, "stage has not begun"))?
            .table
            .rows()
            .iter()
            .map(|r| r.level)
            .collect();
        let mut next = self.bourne.clone();
        for (level, value) in levels.into_iter().zip(kpis) {
            next = next.apply(Event::SetKpi {
                stage,
                level,
                value: Some(value),
            })?;
        }
        next = next.apply(Event::Run { stage })?;
        self.bourne = next;
        self.bourne
            .stage(stage)
            .ok_or_else(|| AppError::Analysis("stage record missing after run".to_string()))
    }

    pub fn report(&self) -> &MixingReport {
        &self.report
    }

    /// Add the current operating case to the report.
    pub fn add_to_report(&mut self) -> AppResult<&ReportCase> {
        let reactor = self.reactor()?;
        let op = self.case.operating_point(&reactor);
        let loading = self
            .case
            .mixture()
            .ok()
            .and_then(|m| m.solid().map(|s| s.loading_pct));
        Ok(self
            .report
            .add_case(&reactor.id, &reactor.owner, op.n_rpm(), op.v_l(), loading))
    }
}
