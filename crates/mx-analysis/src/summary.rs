//! Mixing summary of one vessel at its current operating point.

use crate::banding::{
    DrawdownCondition, SuspensionQuality, agitation_headroom_pct, drawdown_headroom_pct,
};
use crate::damkohler::{DaIIVerdict, da_mass_transfer};
use crate::error::AnalysisResult;
use crate::point::{KlaModel, PointState, PowerBasis, evaluate_point};
use mx_core::units::in_rpm;
use mx_correlations::{
    GmbInputs, ZwieteringInputs, format_reynolds, gas_drawdown_min_speed, kolmogorov_length,
    njs_gmb, njs_zwietering, shear_impeller, shear_vessel, tip_speed,
};
use mx_system::{Mixture, OperatingPoint, ReactionRate, Reactor};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NjsCorrelation {
    Zwietering,
    GrenvilleMakBrown,
}

impl fmt::Display for NjsCorrelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zwietering => write!(f, "Zwietering"),
            Self::GrenvilleMakBrown => write!(f, "GMB"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NjsEstimate {
    pub correlation: NjsCorrelation,
    pub njs_rpm: f64,
    /// N / Njs
    pub ratio: f64,
    pub quality: SuspensionQuality,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawdownEstimate {
    /// Upper-impeller submergence [m]
    pub submergence_m: f64,
    pub min_speed_rpm: f64,
    /// N / N_min
    pub ratio: f64,
    pub condition: DrawdownCondition,
    pub headroom_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaII {
    pub value: f64,
    pub verdict: DaIIVerdict,
}

/// Everything the mixing page reports for one operating point.
///
/// Pieces whose inputs are missing are left out and explained in
/// `warnings`; the rest of the summary is still produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MixingSummary {
    pub reactor_id: String,
    pub operating_point: OperatingPoint,
    pub state: PointState,
    pub reynolds_label: String,
    /// Spare agitation to the vessel maximum [%]
    pub agitation_headroom_pct: f64,
    pub tip_speed_m_s: f64,
    pub shear_vessel_per_s: f64,
    pub shear_impeller_per_s: f64,
    pub kolmogorov_length_m: f64,
    pub da_ii: Option<DaII>,
    pub heat_generation_kw: Option<f64>,
    pub suspension: Vec<NjsEstimate>,
    pub drawdown: Option<DrawdownEstimate>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryOptions {
    pub power_basis: PowerBasis,
    pub kla: KlaModel,
    pub gas_drawdown: bool,
}

/// # Errors
/// The hydrodynamic state itself cannot be evaluated (liquid below the
/// dish, no impellers). Missing solids or reaction data only produce
/// warnings.
pub fn mixing_summary(
    reactor: &Reactor,
    mixture: &Mixture,
    op: &OperatingPoint,
    reaction: Option<&ReactionRate>,
    opts: &SummaryOptions,
) -> AnalysisResult<MixingSummary> {
    let props = mixture.properties();
    let state = evaluate_point(reactor, props, op, opts.power_basis, &opts.kla)?;
    let fill = state.fill;
    let main = reactor.geometry.main_impeller()?;
    let n = op.n_rpm();
    let d = main.diameter.value;
    let mu_pa_s = props.dynamic_viscosity.value;
    let mut warnings = Vec::new();

    let (da_ii, heat_generation_kw) = match reaction {
        Some(rxn) => match rxn.checked_rate() {
            Ok(r) => {
                let value = da_mass_transfer(r, state.kla);
                (
                    Some(DaII {
                        value,
                        verdict: DaIIVerdict::classify(value),
                    }),
                    Some(rxn.heat_generation_kw(state.mass_kg)),
                )
            }
            Err(err) => {
                warnings.push(err.to_string());
                (None, None)
            }
        },
        None => {
            warnings.push("reaction rate not defined".to_string());
            (None, None)
        }
    };

    let suspension = suspension_estimates(reactor, mixture, n, &mut warnings);

    let drawdown = if opts.gas_drawdown {
        let upper = reactor.geometry.upper_impeller()?;
        let h_sub = reactor.geometry.upper_submergence(&fill)?.value;
        let n_max = in_rpm(reactor.envelope.agitation_max);
        let min_speed = gas_drawdown_min_speed(
            upper.diameter.value,
            h_sub,
            reactor.constants.gassing_system,
        );
        let ratio = n / min_speed;
        Some(DrawdownEstimate {
            submergence_m: h_sub,
            min_speed_rpm: min_speed,
            ratio,
            condition: DrawdownCondition::from_ratio(ratio),
            headroom_pct: drawdown_headroom_pct(n_max, min_speed),
        })
    } else {
        None
    };

    if fill.is_dry() {
        warnings.push("no impeller is submerged".to_string());
    }
    if reactor.envelope.exceeds_capacity(op.volume) {
        warnings.push("liquid volume exceeds maximum vessel capacity".to_string());
    }

    tracing::debug!(
        reactor = %reactor.id,
        n_rpm = n,
        re = state.reynolds,
        power_w = state.power_w,
        warnings = warnings.len(),
        "mixing summary evaluated"
    );

    Ok(MixingSummary {
        reactor_id: reactor.id.clone(),
        operating_point: *op,
        reynolds_label: format_reynolds(state.reynolds),
        agitation_headroom_pct: agitation_headroom_pct(
            n,
            in_rpm(reactor.envelope.agitation_max),
        ),
        tip_speed_m_s: tip_speed(n, d),
        shear_vessel_per_s: shear_vessel(state.power_w, op.volume.value, mu_pa_s),
        shear_impeller_per_s: shear_impeller(state.power_w, d, mu_pa_s),
        kolmogorov_length_m: kolmogorov_length(
            state.p_per_m,
            props.kinematic_viscosity.value,
        ),
        state,
        da_ii,
        heat_generation_kw,
        suspension,
        drawdown,
        warnings,
    })
}

fn suspension_estimates(
    reactor: &Reactor,
    mixture: &Mixture,
    n_rpm: f64,
    warnings: &mut Vec<String>,
) -> Vec<NjsEstimate> {
    let Some(solid) = mixture.solid() else {
        warnings.push("no solid phase in mixture; suspension not evaluated".to_string());
        return Vec::new();
    };
    let Some(d_p) = solid.particle_diameter else {
        warnings.push("solid particle size missing; suspension not evaluated".to_string());
        return Vec::new();
    };
    let main = match reactor.geometry.main_impeller() {
        Ok(imp) => imp,
        Err(err) => {
            warnings.push(err.to_string());
            return Vec::new();
        }
    };
    let props = mixture.properties();
    let rho_l = props.density.value;
    let rho_s = solid.density.value;
    if rho_s <= rho_l {
        warnings.push(format!(
            "solid density {rho_s} kg/m3 does not exceed liquid density {rho_l} kg/m3"
        ));
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut push = |correlation, njs_rpm: f64| {
        let ratio = n_rpm / njs_rpm;
        out.push(NjsEstimate {
            correlation,
            njs_rpm,
            ratio,
            quality: SuspensionQuality::from_ratio(ratio),
        });
    };

    match reactor.constants.zwietering_s {
        Some(s) => push(
            NjsCorrelation::Zwietering,
            njs_zwietering(&ZwieteringInputs {
                s,
                nu: props.kinematic_viscosity.value,
                rho_l,
                rho_s,
                mass_ratio_pct: solid.loading_pct,
                d_p: d_p.value,
                d: main.diameter.value,
            }),
        ),
        None => warnings.push("Zwietering S parameter missing".to_string()),
    }

    match reactor.constants.gmb_z {
        Some(z) => push(
            NjsCorrelation::GrenvilleMakBrown,
            njs_gmb(&GmbInputs {
                z,
                po: main.power_number,
                d: main.diameter.value,
                rho_l,
                rho_s,
                volume_fraction_pct: solid.volume_fraction_pct,
                d_p: d_p.value,
                clearance: main.clearance.value,
            }),
        ),
        None => warnings.push("GMB z parameter missing".to_string()),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lab_reactor, slurry, water_mixture};

    fn opts() -> SummaryOptions {
        SummaryOptions {
            gas_drawdown: true,
            ..Default::default()
        }
    }

    #[test]
    fn liquid_only_summary_warns_about_solids() {
        let reactor = lab_reactor();
        let mix = water_mixture();
        let op = OperatingPoint::new(350.0, 4.0);
        let rxn = ReactionRate::new(0.01, 1.0, -100.0);
        let s = mixing_summary(&reactor, &mix, &op, Some(&rxn), &opts()).expect("summary");
        assert!(s.suspension.is_empty());
        assert!(s.warnings.iter().any(|w| w.contains("solid")));
        assert!(s.da_ii.is_some());
        assert!(s.drawdown.is_some());
        assert_eq!(s.reynolds_label, "15k");
        assert!((s.agitation_headroom_pct - 250.0 / 350.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn slurry_summary_has_both_njs() {
        let reactor = lab_reactor();
        let mix = slurry();
        let op = OperatingPoint::new(500.0, 4.0);
        let s = mixing_summary(&reactor, &mix, &op, None, &SummaryOptions::default())
            .expect("summary");
        assert_eq!(s.suspension.len(), 2);
        for est in &s.suspension {
            assert!(est.njs_rpm.is_finite() && est.njs_rpm > 0.0);
            assert_eq!(est.quality, SuspensionQuality::from_ratio(est.ratio));
        }
        assert!(s.da_ii.is_none());
        assert!(s.drawdown.is_none());
    }

    #[test]
    fn zero_rate_blocks_da_ii_only() {
        let reactor = lab_reactor();
        let op = OperatingPoint::new(300.0, 4.0);
        let rxn = ReactionRate::new(0.0, 1.0, -100.0);
        let s = mixing_summary(&reactor, &water_mixture(), &op, Some(&rxn), &opts())
            .expect("summary");
        assert!(s.da_ii.is_none());
        assert!(s.heat_generation_kw.is_none());
        assert!(s.state.power_w > 0.0);
    }
}
