//! Just-suspended speed for solids in stirred tanks.
//!
//! Two independent correlations are kept side by side; they take different
//! inputs (mass ratio vs volume fraction, geometric constant `S` vs `z`) and
//! are reported together so one can be used to sanity-check the other.

use mx_core::units::{constants::G_MPS2, rps_to_rpm};
use serde::{Deserialize, Serialize};

/// Inputs to the Zwietering correlation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZwieteringInputs {
    /// Geometric constant `S` [-]
    pub s: f64,
    /// Liquid kinematic viscosity [m²/s]
    pub nu: f64,
    /// Liquid density [kg/m³]
    pub rho_l: f64,
    /// Solid density [kg/m³]
    pub rho_s: f64,
    /// Solid to liquid mass ratio `m_S/m_L · 100` [%]
    pub mass_ratio_pct: f64,
    /// Particle diameter [m]
    pub d_p: f64,
    /// Impeller diameter [m]
    pub d: f64,
}

/// Inputs to the Grenville-Mak-Brown correlation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GmbInputs {
    /// Geometric constant `z` [-]
    pub z: f64,
    /// Impeller power number [-]
    pub po: f64,
    /// Impeller diameter [m]
    pub d: f64,
    /// Liquid density [kg/m³]
    pub rho_l: f64,
    /// Solid density [kg/m³]
    pub rho_s: f64,
    /// Solid volume fraction `V_S/V_slurry · 100` [%]
    pub volume_fraction_pct: f64,
    /// Particle diameter [m]
    pub d_p: f64,
    /// Impeller clearance [m]
    pub clearance: f64,
}

fn reduced_gravity(rho_l: f64, rho_s: f64) -> f64 {
    G_MPS2 * (rho_s - rho_l) / rho_l
}

/// Zwietering just-suspended speed [rpm].
///
/// ```text
/// Njs = S ν^0.1 (g Δρ/ρ_L)^0.45 X^0.13 d_P^0.2 D^-0.85
/// ```
pub fn njs_zwietering(i: &ZwieteringInputs) -> f64 {
    let rps = i.s
        * i.nu.powf(0.1)
        * reduced_gravity(i.rho_l, i.rho_s).powf(0.45)
        * i.mass_ratio_pct.powf(0.13)
        * i.d_p.powf(0.2)
        * i.d.powf(-0.85);
    rps_to_rpm(rps)
}

/// Grenville-Mak-Brown just-suspended speed [rpm].
///
/// ```text
/// Njs = z Po^-0.333 D^-0.667 (g Δρ/ρ_L)^0.5 Xv^0.154 d_P^0.167 (C/D)^0.1
/// ```
pub fn njs_gmb(i: &GmbInputs) -> f64 {
    let rps = i.z
        * i.po.powf(-0.333)
        * i.d.powf(-0.667)
        * reduced_gravity(i.rho_l, i.rho_s).powf(0.5)
        * i.volume_fraction_pct.powf(0.154)
        * i.d_p.powf(0.167)
        * (i.clearance / i.d).powf(0.1);
    rps_to_rpm(rps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_core::{Tolerances, nearly_equal};

    fn zw() -> ZwieteringInputs {
        ZwieteringInputs {
            s: 6.0,
            nu: 1e-6,
            rho_l: 1000.0,
            rho_s: 2500.0,
            mass_ratio_pct: 5.0,
            d_p: 150e-6,
            d: 0.1,
        }
    }

    fn gmb() -> GmbInputs {
        GmbInputs {
            z: 1.0,
            po: 1.27,
            d: 0.1,
            rho_l: 1000.0,
            rho_s: 2500.0,
            volume_fraction_pct: 2.0,
            d_p: 150e-6,
            clearance: 0.033,
        }
    }

    #[test]
    fn zwietering_matches_hand_calculation() {
        let i = zw();
        let expected = 6.0
            * 1e-6_f64.powf(0.1)
            * (9.81_f64 * 1.5).powf(0.45)
            * 5.0_f64.powf(0.13)
            * 150e-6_f64.powf(0.2)
            * 0.1_f64.powf(-0.85)
            * 60.0;
        assert!(nearly_equal(njs_zwietering(&i), expected, Tolerances::default()));
    }

    #[test]
    fn zwietering_larger_impeller_suspends_sooner() {
        let small = njs_zwietering(&zw());
        let big = njs_zwietering(&ZwieteringInputs { d: 0.2, ..zw() });
        assert!(big < small);
    }

    #[test]
    fn gmb_denser_solid_needs_more_speed() {
        let light = njs_gmb(&gmb());
        let heavy = njs_gmb(&GmbInputs {
            rho_s: 4000.0,
            ..gmb()
        });
        assert!(heavy > light);
    }

    #[test]
    fn gmb_is_finite_for_typical_slurry() {
        let n = njs_gmb(&gmb());
        assert!(n.is_finite() && n > 0.0);
    }

    #[test]
    fn neutrally_buoyant_solid_needs_no_agitation() {
        let n = njs_zwietering(&ZwieteringInputs {
            rho_s: 1000.0,
            ..zw()
        });
        assert_eq!(n, 0.0);
    }
}
