//! Impeller hydrodynamics.

use crate::error::CorrelationError;
use mx_core::units::{cp_to_pa_s, rpm_to_rps};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Reynolds number for a stirred tank [-].
///
/// ```text
/// Re = ρ · (N/60) · d² / (μ/1000)
/// ```
///
/// * `rho` - density [kg/m³]
/// * `d` - impeller diameter [m]
/// * `n_rpm` - impeller speed [rpm]
/// * `mu_cp` - dynamic viscosity [cP]
///
/// The caller guarantees `mu_cp != 0`.
pub fn reynolds(rho: f64, d: f64, n_rpm: f64, mu_cp: f64) -> f64 {
    rho * rpm_to_rps(n_rpm) * d.powi(2) / cp_to_pa_s(mu_cp)
}

/// Power drawn by a single impeller [W].
///
/// ```text
/// P = Po · ρ_L · (N/60)³ · D⁵
/// ```
///
/// * `po` - impeller power number [-]
/// * `rho_l` - liquid density [kg/m³]
/// * `n_rpm` - impeller speed [rpm]
/// * `d` - impeller diameter [m]
///
/// Multi-impeller shafts are summed by the caller.
pub fn power_input(po: f64, rho_l: f64, n_rpm: f64, d: f64) -> f64 {
    po * rho_l * rpm_to_rps(n_rpm).powi(3) * d.powi(5)
}

/// Impeller tip speed [m/s] for speed in rpm and diameter in m.
pub fn tip_speed(n_rpm: f64, d: f64) -> f64 {
    PI * d * n_rpm / 60.0
}

/// Vessel-average shear rate [1/s].
///
/// * `power` - [W]
/// * `volume_m3` - [m³]
/// * `mu_pa_s` - dynamic viscosity [Pa·s]
pub fn shear_vessel(power: f64, volume_m3: f64, mu_pa_s: f64) -> f64 {
    (power / volume_m3 / mu_pa_s).sqrt()
}

/// Impeller-zone average shear rate [1/s].
///
/// The swept impeller volume is taken as a disc of diameter `d` and height
/// `d/4`, and 30 % of the power is assumed to dissipate there.
pub fn shear_impeller(power: f64, d: f64, mu_pa_s: f64) -> f64 {
    let v_imp = (PI * d.powi(2) / 4.0) * (d / 4.0);
    (0.3 * power / (v_imp * mu_pa_s)).sqrt()
}

/// Flow regime in the vessel, classified from the impeller Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    /// Re below 10 is laminar, 10 up to 10 000 transitional, above that turbulent.
    pub fn from_reynolds(re: f64) -> Self {
        if re >= 10_000.0 {
            Self::Turbulent
        } else if re >= 10.0 {
            Self::Transitional
        } else {
            Self::Laminar
        }
    }
}

impl fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Laminar => write!(f, "Laminar"),
            Self::Transitional => write!(f, "Transitional"),
            Self::Turbulent => write!(f, "Turbulent"),
        }
    }
}

impl FromStr for FlowRegime {
    type Err = CorrelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "laminar" => Ok(Self::Laminar),
            "transitional" => Ok(Self::Transitional),
            "turbulent" => Ok(Self::Turbulent),
            _ => Err(CorrelationError::UnknownRegime(s.to_string())),
        }
    }
}

/// Compact display of a Reynolds number: `2M`, `45k`, `870`.
pub fn format_reynolds(re: f64) -> String {
    if re.abs() >= 1_000_000.0 {
        format!("{}M", (re / 1_000_000.0).round() as i64)
    } else if re.abs() >= 1_000.0 {
        format!("{}k", (re / 1_000.0).round() as i64)
    } else {
        format!("{}", re.trunc() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_core::{Tolerances, nearly_equal};

    #[test]
    fn reynolds_water_lab_impeller() {
        // 1000 * 5 rps * 0.01 m2 / 0.001 Pa.s
        let re = reynolds(1000.0, 0.1, 300.0, 1.0);
        assert!(nearly_equal(re, 50_000.0, Tolerances::default()));
    }

    #[test]
    fn power_doubles_speed_eightfold() {
        let p1 = power_input(5.0, 1000.0, 100.0, 0.2);
        let p2 = power_input(5.0, 1000.0, 200.0, 0.2);
        assert!(nearly_equal(p2 / p1, 8.0, Tolerances::default()));
    }

    #[test]
    fn power_scales_with_fifth_power_of_diameter() {
        let p1 = power_input(0.75, 1100.0, 150.0, 0.3);
        let p2 = power_input(0.75, 1100.0, 150.0, 0.6);
        assert!(nearly_equal(p2 / p1, 32.0, Tolerances::default()));
    }

    #[test]
    fn power_known_value() {
        // Po=5, rho=1000, N=60 rpm (1 rps), D=1 m -> 5000 W
        assert!(nearly_equal(
            power_input(5.0, 1000.0, 60.0, 1.0),
            5000.0,
            Tolerances::default()
        ));
    }

    #[test]
    fn tip_speed_one_rev_per_second() {
        assert!(nearly_equal(tip_speed(60.0, 1.0), PI, Tolerances::default()));
    }

    #[test]
    fn shear_rates_are_positive() {
        let gv = shear_vessel(100.0, 0.1, 1e-3);
        assert!(nearly_equal(gv, 1000.0, Tolerances::default()));
        let gi = shear_impeller(100.0, 0.1, 1e-3);
        assert!(gi > gv, "impeller zone shears harder than the bulk");
    }

    #[test]
    fn regime_boundaries() {
        assert_eq!(FlowRegime::from_reynolds(9.99), FlowRegime::Laminar);
        assert_eq!(FlowRegime::from_reynolds(10.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::from_reynolds(9_999.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::from_reynolds(10_000.0), FlowRegime::Turbulent);
    }

    #[test]
    fn regime_parse() {
        assert_eq!("Turbulent".parse::<FlowRegime>(), Ok(FlowRegime::Turbulent));
        assert!("plug".parse::<FlowRegime>().is_err());
    }

    #[test]
    fn reynolds_formatting() {
        assert_eq!(format_reynolds(2_400_000.0), "2M");
        assert_eq!(format_reynolds(45_300.0), "45k");
        assert_eq!(format_reynolds(870.4), "870");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn reynolds_increases_with_speed(
            rho in 500.0_f64..2000.0,
            d in 0.01_f64..2.0,
            n in 1.0_f64..1000.0,
            dn in 0.1_f64..500.0,
            mu in 0.1_f64..1000.0,
        ) {
            prop_assert!(reynolds(rho, d, n + dn, mu) > reynolds(rho, d, n, mu));
        }

        #[test]
        fn reynolds_increases_with_density(
            rho in 500.0_f64..2000.0,
            drho in 1.0_f64..500.0,
            d in 0.01_f64..2.0,
            n in 1.0_f64..1000.0,
            mu in 0.1_f64..1000.0,
        ) {
            prop_assert!(reynolds(rho + drho, d, n, mu) > reynolds(rho, d, n, mu));
        }

        #[test]
        fn reynolds_decreases_with_viscosity(
            rho in 500.0_f64..2000.0,
            d in 0.01_f64..2.0,
            n in 1.0_f64..1000.0,
            mu in 0.1_f64..1000.0,
            dmu in 0.1_f64..100.0,
        ) {
            prop_assert!(reynolds(rho, d, n, mu + dmu) < reynolds(rho, d, n, mu));
        }

        #[test]
        fn power_is_cubic_in_speed(
            po in 0.3_f64..6.0,
            rho in 500.0_f64..2000.0,
            n in 1.0_f64..1000.0,
            d in 0.01_f64..2.0,
        ) {
            let ratio = power_input(po, rho, 2.0 * n, d) / power_input(po, rho, n, d);
            prop_assert!((ratio - 8.0).abs() < 1e-9);
        }
    }
}
