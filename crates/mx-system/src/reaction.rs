//! Reaction rate input.

use crate::error::{SystemError, SystemResult};
use serde::{Deserialize, Serialize};

/// Lumped reaction kinetics used for relative rate comparisons.
///
/// `r_rxn = k · C_eff` [mol/kg/s]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionRate {
    /// Overall rate constant
    pub k: f64,
    /// Effective concentration
    pub c_eff: f64,
    /// Heat of reaction [kJ/mol], exothermic < 0
    pub dh_rxn_kj_mol: f64,
}

impl Default for ReactionRate {
    fn default() -> Self {
        Self {
            k: 1.0,
            c_eff: 1.0,
            dh_rxn_kj_mol: -100.0,
        }
    }
}

impl ReactionRate {
    pub fn new(k: f64, c_eff: f64, dh_rxn_kj_mol: f64) -> Self {
        Self {
            k,
            c_eff,
            dh_rxn_kj_mol,
        }
    }

    /// Raw `k · C_eff`, possibly zero.
    pub fn r_rxn(&self) -> f64 {
        self.k * self.c_eff
    }

    /// Rate usable as a Damköhler denominator/numerator.
    ///
    /// # Errors
    /// The rate is zero or not finite; no Damköhler number may be formed.
    pub fn checked_rate(&self) -> SystemResult<f64> {
        let r = self.r_rxn();
        if !r.is_finite() || r == 0.0 {
            return Err(SystemError::NonPhysical {
                what: "reaction rate must be defined and nonzero",
                value: r,
            });
        }
        Ok(r)
    }

    /// Heat released by the batch [kW] for a mixture mass in kg.
    ///
    /// Positive for exothermic reactions.
    pub fn heat_generation_kw(&self, mass_kg: f64) -> f64 {
        -self.r_rxn() * self.dh_rxn_kj_mol * mass_kg
    }
}
