//! Gas-liquid mass transfer from the headspace by surface gas drawdown.

use crate::error::CorrelationError;
use mx_core::units::{constants::G_MPS2, rps_to_rpm};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default `A` for [`kla_gas_drawdown`] when no vessel-specific fit exists.
pub const DEFAULT_KLA_A: f64 = 0.07;
/// Default exponent `b` for [`kla_gas_drawdown`].
pub const DEFAULT_KLA_B: f64 = 0.53;

/// How the headspace gas reaches the upper impeller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GassingSystem {
    /// Free-surface vortex drawdown.
    #[default]
    Vortexing,
    /// Hollow-shaft self-aspirating impeller.
    SelfAspirating,
}

impl GassingSystem {
    /// Critical Froude number `N²D²/(g·H_sub)` at which drawdown begins.
    pub fn critical_froude(self) -> f64 {
        match self {
            Self::Vortexing => 0.15,
            Self::SelfAspirating => 0.20,
        }
    }
}

impl fmt::Display for GassingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vortexing => write!(f, "vortexing"),
            Self::SelfAspirating => write!(f, "self-aspirating"),
        }
    }
}

impl FromStr for GassingSystem {
    type Err = CorrelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vortexing" => Ok(Self::Vortexing),
            "self-aspirating" | "self_aspirating" => Ok(Self::SelfAspirating),
            _ => Err(CorrelationError::UnknownGassingSystem(s.to_string())),
        }
    }
}

/// Minimum impeller speed at which surface gas drawdown occurs [rpm].
///
/// ```text
/// N_min = sqrt(Fr · g · H_sub / D²) · 60
/// ```
///
/// * `d` - diameter of the upper impeller [m]
/// * `h_sub` - submergence of the upper impeller [m]
pub fn gas_drawdown_min_speed(d: f64, h_sub: f64, system: GassingSystem) -> f64 {
    rps_to_rpm((system.critical_froude() * G_MPS2 * h_sub / d.powi(2)).sqrt())
}

/// Free-surface kLa from specific power only [1/s].
///
/// ```text
/// kLa = A · (P/M)^b
/// ```
///
/// * `power` - total impeller power [W]
/// * `mass` - liquid mass [kg]
pub fn kla_gas_drawdown(a: f64, b: f64, power: f64, mass: f64) -> f64 {
    a * (power / mass).powf(b)
}

/// Free-surface kLa including the upper-impeller submergence [1/s].
///
/// ```text
/// kLa = C · (P/M)^b · (H_sub/D)^e
/// ```
pub fn kla_gas_drawdown_submerged(
    c: f64,
    b: f64,
    power: f64,
    mass: f64,
    h_sub: f64,
    d: f64,
    e: f64,
) -> f64 {
    c * (power / mass).powf(b) * (h_sub / d).powf(e)
}
