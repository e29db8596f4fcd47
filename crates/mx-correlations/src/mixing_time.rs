//! Bulk blending and micromixing time scales.

use crate::fluid_dynamics::FlowRegime;
use mx_core::units::{liters_to_m3, rpm_to_rps};

/// Engulfment-model constant for the micromixing rate.
pub const ENGULFMENT_CONSTANT: f64 = 0.05776;

/// Empirical bulk mixing time [s].
///
/// ```text
/// t_m = Km · (V/1000) · (N/60)^(-1/3) · D^(-5)
/// ```
///
/// * `km` - mixing constant [-]
/// * `v_l` - liquid volume [L]
/// * `n_rpm` - impeller speed [rpm]
/// * `d` - impeller diameter [m]
pub fn mixing_time_simple(km: f64, v_l: f64, n_rpm: f64, d: f64) -> f64 {
    km * liters_to_m3(v_l) * rpm_to_rps(n_rpm).powf(-1.0 / 3.0) * d.powi(-5)
}

/// Regime-dependent bulk mixing time [s].
///
/// * `h` - liquid height [m]
/// * `t` - tank diameter [m]
/// * `d` - impeller diameter [m]
/// * `v_m3` - liquid volume [m³]
/// * `eps` - power per unit volume [kW/m³]
/// * `mu_pa_s` - dynamic viscosity [Pa·s]
/// * `rho_l` - liquid density [kg/m³]
///
/// Turbulent:
/// ```text
/// C = 5.4 (H/T)^1.4 / (V/(T²H))^(1/3)
/// t_m = C ε^(-1/3) (T/D)^(1/3) T^(2/3)
/// ```
/// Transitional:
/// ```text
/// C = 38025 / (V/(T²H))^(2/3)
/// t_m = C ε^(-2/3) (μ/ρ) (T/D)^(2/3) T^(-2/3)
/// ```
///
/// Returns `None` for the laminar regime, where neither correlation holds.
#[allow(clippy::too_many_arguments)]
pub fn mixing_time_regime(
    h: f64,
    t: f64,
    d: f64,
    v_m3: f64,
    eps: f64,
    mu_pa_s: f64,
    rho_l: f64,
    regime: FlowRegime,
) -> Option<f64> {
    let fill = v_m3 / (t.powi(2) * h);
    match regime {
        FlowRegime::Turbulent => {
            let c = 5.4 * (h / t).powf(1.4) / fill.powf(1.0 / 3.0);
            Some(c * eps.powf(-1.0 / 3.0) * (t / d).powf(1.0 / 3.0) * t.powf(2.0 / 3.0))
        }
        FlowRegime::Transitional => {
            let c = 38_025.0 / fill.powf(2.0 / 3.0);
            Some(
                c * eps.powf(-2.0 / 3.0)
                    * (mu_pa_s / rho_l)
                    * (t / d).powf(2.0 / 3.0)
                    * t.powf(-2.0 / 3.0),
            )
        }
        FlowRegime::Laminar => None,
    }
}

/// Micromixing (engulfment) rate [1/s].
///
/// * `eps` - power per unit mass [W/kg]
/// * `nu` - kinematic viscosity [m²/s]
pub fn micromixing_rate(eps: f64, nu: f64) -> f64 {
    ENGULFMENT_CONSTANT * (eps / nu).sqrt()
}

/// Micromixing time [s], the reciprocal of [`micromixing_rate`].
pub fn micromixing_time(eps: f64, nu: f64) -> f64 {
    1.0 / micromixing_rate(eps, nu)
}

/// Kolmogorov length scale [m] for `eps` in W/kg and `nu` in m²/s.
pub fn kolmogorov_length(eps: f64, nu: f64) -> f64 {
    (nu.powi(3) / eps).powf(0.25)
}
