//! Grid sweeps over a vessel's operating envelope.
//!
//! Two table shapes are produced:
//! - the sensitivity grid: every agitation level at the two volume extremes
//!   of one vessel, with all three Damköhler ratios;
//! - the scale sweep: a volume × agitation grid per vessel for any number
//!   of vessels, with the mass transfer ratio, sorted by kLa so curves from
//!   different scales share a P/M axis.
//!
//! Grid points are independent and evaluated in parallel; row order is the
//! grid order (sensitivity) or ascending kLa (scale). Volume levels that do
//! not fill a vessel's bottom dish have no liquid height; they are left out
//! of the rows and listed in [`SweepResult::skipped`].

use crate::damkohler::{DamkohlerSet, Limitation, Mechanism, da_mass_transfer};
use crate::error::{AnalysisError, AnalysisResult};
use crate::point::{KlaModel, PowerBasis, evaluate_point};
use mx_core::linspace;
use mx_core::units::{in_liters, in_rpm, liters};
use mx_system::{OperatingPoint, PhysicalProperties, ReactionRate, Reactor};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Volume levels per vessel in the scale sweep.
    pub volume_levels: usize,
    /// Agitation levels per volume in the scale sweep.
    pub agitation_levels: usize,
    /// Agitation levels per volume extreme in the sensitivity grid.
    pub sensitivity_levels: usize,
    pub power_basis: PowerBasis,
    pub kla: KlaModel,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            volume_levels: 6,
            agitation_levels: 6,
            sensitivity_levels: 21,
            power_basis: PowerBasis::default(),
            kla: KlaModel::default(),
        }
    }
}

impl SweepSettings {
    fn check(&self) -> AnalysisResult<()> {
        if self.volume_levels < 2 || self.agitation_levels < 2 || self.sensitivity_levels < 2 {
            return Err(AnalysisError::InvalidArg {
                what: "sweep level counts must be at least 2",
            });
        }
        Ok(())
    }
}

/// Rows that can be screened for a transport limitation.
pub trait LimitedRow {
    fn is_limited_by(&self, mechanism: Mechanism) -> bool;
}

/// One row of the sensitivity grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRow {
    /// `Vmin` or `Vmax`
    pub series: String,
    pub volume_l: f64,
    pub agitation_rpm: f64,
    /// [W/kg]
    pub p_per_m: f64,
    /// [W/m³]
    pub p_per_v: f64,
    /// [1/s]
    pub kla: f64,
    /// [s]
    pub t_micro: f64,
    /// [s]; `None` where the flow is laminar.
    pub t_macro: Option<f64>,
    pub da: DamkohlerSet,
}

impl LimitedRow for SensitivityRow {
    fn is_limited_by(&self, mechanism: Mechanism) -> bool {
        self.da.is_limited_by(mechanism)
    }
}

/// One row of the scale sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleRow {
    /// Scale label, or the reactor id when the vessel has no scale.
    pub series: String,
    pub reactor_id: String,
    pub volume_l: f64,
    pub agitation_rpm: f64,
    /// Liquid mass [kg]
    pub mass_kg: f64,
    /// Shaft power [W]
    pub power_w: f64,
    /// [W/kg]
    pub p_per_m: f64,
    /// [W/m³]
    pub p_per_v: f64,
    /// [1/s]
    pub kla: f64,
    /// `r_rxn / kLa`
    pub da_1: f64,
}

impl LimitedRow for ScaleRow {
    fn is_limited_by(&self, mechanism: Mechanism) -> bool {
        mechanism == Mechanism::MassTransfer && Limitation::classify(self.da_1).is_limited()
    }
}

/// A grid volume left out because it sits inside the bottom dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedVolume {
    pub reactor_id: String,
    pub volume_l: f64,
}

/// Ordered rows of one sweep invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult<R> {
    pub rows: Vec<R>,
    #[serde(default)]
    pub skipped: Vec<SkippedVolume>,
}

impl<R> SweepResult<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows,
            skipped: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: LimitedRow + Clone> SweepResult<R> {
    /// Rows where `mechanism` limits the reaction. A filter, no recomputation.
    pub fn limited(&self, mechanism: Mechanism) -> Vec<R> {
        self.rows
            .iter()
            .filter(|r| r.is_limited_by(mechanism))
            .cloned()
            .collect()
    }

    pub fn any_limited(&self, mechanism: Mechanism) -> bool {
        self.rows.iter().any(|r| r.is_limited_by(mechanism))
    }
}

/// Keep the volume levels that rise above the bottom dish.
fn fillable_volumes(
    reactor: &Reactor,
    volumes: impl IntoIterator<Item = f64>,
    skipped: &mut Vec<SkippedVolume>,
) -> Vec<f64> {
    let mut kept = Vec::new();
    for v_l in volumes {
        if reactor.geometry.fills_dish(liters(v_l)) {
            kept.push(v_l);
        } else {
            tracing::warn!(
                reactor = %reactor.id,
                volume_l = v_l,
                dish_l = in_liters(reactor.geometry.dish_volume()),
                "grid volume does not fill the bottom dish; skipped"
            );
            skipped.push(SkippedVolume {
                reactor_id: reactor.id.clone(),
                volume_l: v_l,
            });
        }
    }
    kept
}

fn checked_rate(reaction: &ReactionRate) -> AnalysisResult<f64> {
    reaction
        .checked_rate()
        .map_err(|e| AnalysisError::precondition(e.to_string()))
}

/// Sensitivity grid of one vessel.
///
/// # Errors
/// The reaction rate is zero or undefined.
pub fn sensitivity_grid(
    reactor: &Reactor,
    props: &PhysicalProperties,
    reaction: &ReactionRate,
    settings: &SweepSettings,
) -> AnalysisResult<SweepResult<SensitivityRow>> {
    settings.check()?;
    let r_rxn = checked_rate(reaction)?;
    let env = &reactor.envelope;
    let speeds = linspace(
        in_rpm(env.agitation_min),
        in_rpm(env.agitation_max),
        settings.sensitivity_levels,
    );

    let mut skipped = Vec::new();
    let mut grid = Vec::with_capacity(2 * speeds.len());
    for (series, v_l) in [
        ("Vmin", in_liters(env.volume_min)),
        ("Vmax", in_liters(env.volume_max)),
    ] {
        for v_l in fillable_volumes(reactor, [v_l], &mut skipped) {
            for &n in &speeds {
                grid.push((series, v_l, n));
            }
        }
    }

    let rows = grid
        .par_iter()
        .map(|&(series, v_l, n)| -> AnalysisResult<SensitivityRow> {
            let op = OperatingPoint::new(n, v_l);
            let s = evaluate_point(reactor, props, &op, settings.power_basis, &settings.kla)?;
            Ok(SensitivityRow {
                series: series.to_string(),
                volume_l: v_l,
                agitation_rpm: n,
                p_per_m: s.p_per_m,
                p_per_v: s.p_per_v,
                kla: s.kla,
                t_micro: s.t_micro,
                t_macro: s.t_macro,
                da: DamkohlerSet::evaluate(r_rxn, s.t_micro, s.t_macro, s.kla),
            })
        })
        .collect::<AnalysisResult<Vec<_>>>()?;

    tracing::info!(
        reactor = %reactor.id,
        rows = rows.len(),
        skipped = skipped.len(),
        "sensitivity grid evaluated"
    );
    Ok(SweepResult { rows, skipped })
}

/// Scale sweep across vessels on a common grid shape.
///
/// # Errors
/// - no vessels
/// - the reaction rate is zero or undefined
pub fn scale_sweep(
    reactors: &[&Reactor],
    props: &PhysicalProperties,
    reaction: &ReactionRate,
    settings: &SweepSettings,
) -> AnalysisResult<SweepResult<ScaleRow>> {
    settings.check()?;
    if reactors.is_empty() {
        return Err(AnalysisError::precondition("no reactors selected for scale sweep"));
    }
    let r_rxn = checked_rate(reaction)?;

    let mut skipped = Vec::new();
    let mut grid = Vec::new();
    for &reactor in reactors {
        let env = &reactor.envelope;
        let volumes = fillable_volumes(
            reactor,
            linspace(
                in_liters(env.volume_min),
                in_liters(env.volume_max),
                settings.volume_levels,
            ),
            &mut skipped,
        );
        let speeds = linspace(
            in_rpm(env.agitation_min),
            in_rpm(env.agitation_max),
            settings.agitation_levels,
        );
        for &v_l in &volumes {
            for &n in &speeds {
                grid.push((reactor, v_l, n));
            }
        }
    }

    let mut rows = grid
        .par_iter()
        .map(|&(reactor, v_l, n)| -> AnalysisResult<ScaleRow> {
            let op = OperatingPoint::new(n, v_l);
            let s = evaluate_point(reactor, props, &op, settings.power_basis, &settings.kla)?;
            Ok(ScaleRow {
                series: reactor
                    .scale
                    .map(|sc| sc.to_string())
                    .unwrap_or_else(|| reactor.id.clone()),
                reactor_id: reactor.id.clone(),
                volume_l: v_l,
                agitation_rpm: n,
                mass_kg: s.mass_kg,
                power_w: s.power_w,
                p_per_m: s.p_per_m,
                p_per_v: s.p_per_v,
                kla: s.kla,
                da_1: da_mass_transfer(r_rxn, s.kla),
            })
        })
        .collect::<AnalysisResult<Vec<_>>>()?;

    rows.sort_by(|a, b| a.kla.total_cmp(&b.kla));

    tracing::info!(
        reactors = reactors.len(),
        rows = rows.len(),
        skipped = skipped.len(),
        "scale sweep evaluated"
    );
    Ok(SweepResult { rows, skipped })
}
