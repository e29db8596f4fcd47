//! Reynolds number and empirical mixing time against agitation speed.

use crate::error::{AnalysisError, AnalysisResult};
use mx_core::linspace;
use mx_core::units::{Volume, in_cp, in_liters};
use mx_correlations::{mixing_time_simple, reynolds};
use mx_system::{PhysicalProperties, Reactor};

/// Points per performance curve.
pub const CURVE_POINTS: usize = 50;
/// Mixing constant `Km` of the empirical bulk mixing time.
pub const DEFAULT_KM: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceCurves {
    pub agitation_rpm: Vec<f64>,
    pub reynolds: Vec<f64>,
    /// Empirical bulk mixing time [s]
    pub mixing_time_s: Vec<f64>,
}

/// Sample both curves between `n_min_rpm` and `n_max_rpm` at `volume`.
///
/// # Errors
/// An inverted speed range or a vessel without impellers.
pub fn performance_curves(
    reactor: &Reactor,
    props: &PhysicalProperties,
    volume: Volume,
    n_min_rpm: f64,
    n_max_rpm: f64,
) -> AnalysisResult<PerformanceCurves> {
    if !(n_min_rpm <= n_max_rpm) {
        return Err(AnalysisError::InvalidArg {
            what: "curve speed range must satisfy min <= max",
        });
    }
    let d = reactor.geometry.main_impeller()?.diameter.value;
    let rho = props.density.value;
    let mu_cp = in_cp(props.dynamic_viscosity);
    let v_l = in_liters(volume);

    let agitation_rpm = linspace(n_min_rpm, n_max_rpm, CURVE_POINTS);
    let reynolds = agitation_rpm
        .iter()
        .map(|&n| reynolds(rho, d, n, mu_cp))
        .collect();
    let mixing_time_s = agitation_rpm
        .iter()
        .map(|&n| mixing_time_simple(DEFAULT_KM, v_l, n, d))
        .collect();

    Ok(PerformanceCurves {
        agitation_rpm,
        reynolds,
        mixing_time_s,
    })
}
