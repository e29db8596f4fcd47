//! Hydrodynamic state of a vessel at one operating point.
//!
//! This is the shared kernel under the mixing summary and both sweeps: every
//! grid point goes through [`evaluate_point`] so the tables and the summary
//! can never disagree on power, mixing times or kLa.

use crate::error::AnalysisResult;
use mx_core::units::{in_cp, liters_to_m3};
use mx_correlations::{
    DEFAULT_KLA_A, DEFAULT_KLA_B, FlowRegime, kla_gas_drawdown, micromixing_time,
    mixing_time_regime, power_input, reynolds,
};
use mx_system::{Fill, OperatingPoint, PhysicalProperties, Reactor, ReactorGeometry};
use serde::{Deserialize, Serialize};

/// Which impellers contribute to the shaft power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerBasis {
    /// Only impellers below the liquid surface.
    #[default]
    Submerged,
    All,
}

/// `kLa = A · (P/M)^b` constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KlaModel {
    pub a: f64,
    pub b: f64,
}

impl Default for KlaModel {
    fn default() -> Self {
        Self {
            a: DEFAULT_KLA_A,
            b: DEFAULT_KLA_B,
        }
    }
}

impl KlaModel {
    pub fn kla(&self, power_w: f64, mass_kg: f64) -> f64 {
        kla_gas_drawdown(self.a, self.b, power_w, mass_kg)
    }
}

/// Sum of per-impeller power [W].
pub fn total_power(
    geometry: &ReactorGeometry,
    fill: &Fill,
    rho_l: f64,
    n_rpm: f64,
    basis: PowerBasis,
) -> f64 {
    geometry
        .impellers
        .iter()
        .filter(|imp| basis == PowerBasis::All || imp.is_submerged(fill.height))
        .map(|imp| power_input(imp.power_number, rho_l, n_rpm, imp.diameter.value))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointState {
    pub fill: Fill,
    pub mass_kg: f64,
    pub power_w: f64,
    /// Power per unit mass [W/kg]
    pub p_per_m: f64,
    /// Power per unit volume [W/m³]
    pub p_per_v: f64,
    pub reynolds: f64,
    pub regime: FlowRegime,
    /// Micromixing time [s]
    pub t_micro: f64,
    /// Bulk mixing time [s]; `None` in laminar flow.
    pub t_macro: Option<f64>,
    /// Free-surface mass transfer coefficient [1/s]
    pub kla: f64,
}

/// Evaluate power, flow regime, mixing times and kLa at `op`.
///
/// Micromixing uses ε = P/M [W/kg]; the regime bulk mixing time uses
/// ε = P/V [kW/m³] with μ in Pa·s.
///
/// # Errors
/// The liquid volume does not fill the bottom dish, or the vessel has no
/// impellers.
pub fn evaluate_point(
    reactor: &Reactor,
    props: &PhysicalProperties,
    op: &OperatingPoint,
    basis: PowerBasis,
    kla_model: &KlaModel,
) -> AnalysisResult<PointState> {
    let geometry = &reactor.geometry;
    let fill = reactor.fill(op.volume)?;
    let main = geometry.main_impeller()?;

    let rho = props.density.value;
    let mu_cp = in_cp(props.dynamic_viscosity);
    let nu = props.kinematic_viscosity.value;
    let n = op.n_rpm();
    let v_m3 = liters_to_m3(op.v_l());
    let mass_kg = op.mass(rho).value;

    let power_w = total_power(geometry, &fill, rho, n, basis);
    let p_per_m = power_w / mass_kg;
    let p_per_v = power_w / v_m3;

    let re = reynolds(rho, main.diameter.value, n, mu_cp);
    let regime = FlowRegime::from_reynolds(re);

    let t_macro = mixing_time_regime(
        fill.height.value,
        geometry.internal_diameter.value,
        main.diameter.value,
        v_m3,
        p_per_v / 1000.0,
        props.dynamic_viscosity.value,
        rho,
        regime,
    );

    Ok(PointState {
        fill,
        mass_kg,
        power_w,
        p_per_m,
        p_per_v,
        reynolds: re,
        regime,
        t_micro: micromixing_time(p_per_m, nu),
        t_macro,
        kla: kla_model.kla(power_w, mass_kg),
    })
}
