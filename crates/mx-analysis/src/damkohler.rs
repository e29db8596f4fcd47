//! Damköhler numbers: competing transport time scales against the reaction.
//!
//! ```text
//! Da_micro = t_micro · r_rxn
//! Da_macro = t_macro · r_rxn
//! Da_massT = r_rxn / kLa        (+∞ when kLa ≤ 0)
//! ```
//!
//! Any Da above 1 means the transport step is slower than the reaction and
//! the observed rate is limited by it.

use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Threshold above which a process counts as transport-limited.
pub const LIMIT_THRESHOLD: f64 = 1.0;

/// Transport mechanism competing with the reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mechanism {
    Micromixing,
    Macromixing,
    MassTransfer,
}

impl Mechanism {
    pub const ALL: [Mechanism; 3] = [Self::Micromixing, Self::Macromixing, Self::MassTransfer];
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Micromixing => write!(f, "micromixing"),
            Self::Macromixing => write!(f, "macromixing"),
            Self::MassTransfer => write!(f, "gas-liquid mass transfer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Limitation {
    Limited,
    NotLimited,
}

impl Limitation {
    /// Da > 1 is limited; exactly 1 passes.
    pub fn classify(da: f64) -> Self {
        if da > LIMIT_THRESHOLD {
            Self::Limited
        } else {
            Self::NotLimited
        }
    }

    pub fn is_limited(self) -> bool {
        self == Self::Limited
    }
}

pub fn da_micro(t_micro: f64, r_rxn: f64) -> f64 {
    t_micro * r_rxn
}

pub fn da_macro(t_macro: f64, r_rxn: f64) -> f64 {
    t_macro * r_rxn
}

/// Reaction rate over mass transfer coefficient; `+∞` when `kla <= 0`.
pub fn da_mass_transfer(r_rxn: f64, kla: f64) -> f64 {
    if kla > 0.0 { r_rxn / kla } else { f64::INFINITY }
}

/// Three-band reading of the reaction/free-surface mass transfer ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaIIVerdict {
    MassTransferLimited,
    Intermediate,
    KineticallyLimited,
}

impl DaIIVerdict {
    pub fn classify(da: f64) -> Self {
        if da > 10.0 {
            Self::MassTransferLimited
        } else if da < 0.1 {
            Self::KineticallyLimited
        } else {
            Self::Intermediate
        }
    }
}

impl fmt::Display for DaIIVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MassTransferLimited => write!(f, "Mass Transfer Limited"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::KineticallyLimited => write!(f, "Kinetically Limited"),
        }
    }
}

/// Damköhler numbers at one operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamkohlerSet {
    pub micro: f64,
    /// Absent when the bulk mixing time is undefined (laminar flow).
    #[serde(rename = "macro")]
    pub macro_: Option<f64>,
    pub mass_transfer: f64,
}

impl DamkohlerSet {
    pub fn evaluate(r_rxn: f64, t_micro: f64, t_macro: Option<f64>, kla: f64) -> Self {
        Self {
            micro: da_micro(t_micro, r_rxn),
            macro_: t_macro.map(|t| da_macro(t, r_rxn)),
            mass_transfer: da_mass_transfer(r_rxn, kla),
        }
    }

    pub fn get(&self, mechanism: Mechanism) -> Option<f64> {
        match mechanism {
            Mechanism::Micromixing => Some(self.micro),
            Mechanism::Macromixing => self.macro_,
            Mechanism::MassTransfer => Some(self.mass_transfer),
        }
    }

    /// Undefined ratios never count as limited.
    pub fn is_limited_by(&self, mechanism: Mechanism) -> bool {
        self.get(mechanism)
            .is_some_and(|da| Limitation::classify(da).is_limited())
    }

    pub fn limiting(&self) -> Vec<Mechanism> {
        Mechanism::ALL
            .into_iter()
            .filter(|m| self.is_limited_by(*m))
            .collect()
    }
}

/// `|value - center| / center`.
///
/// The denominator keeps its sign: a negative centerpoint KPI gives a
/// negative deviation, which never exceeds a positive threshold.
///
/// # Errors
/// A zero or non-finite centerpoint, or a non-finite value. The deviation is
/// never allowed to become NaN or infinite.
pub fn relative_deviation(value: f64, center: f64) -> AnalysisResult<f64> {
    if !center.is_finite() || center == 0.0 {
        return Err(AnalysisError::precondition(format!(
            "centerpoint value must be finite and nonzero, got {center}"
        )));
    }
    if !value.is_finite() {
        return Err(AnalysisError::precondition(format!(
            "value must be finite, got {value}"
        )));
    }
    Ok((value - center).abs() / center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_kla_gives_infinite_ratio() {
        let da = da_mass_transfer(0.5, 0.0);
        assert!(da.is_infinite() && da > 0.0);
        assert!(da_mass_transfer(0.5, -1.0).is_infinite());
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(Limitation::classify(1.0), Limitation::NotLimited);
        assert_eq!(Limitation::classify(1.000_001), Limitation::Limited);
        assert_eq!(Limitation::classify(f64::INFINITY), Limitation::Limited);
    }

    #[test]
    fn da_ii_bands() {
        assert_eq!(DaIIVerdict::classify(11.0), DaIIVerdict::MassTransferLimited);
        assert_eq!(DaIIVerdict::classify(10.0), DaIIVerdict::Intermediate);
        assert_eq!(DaIIVerdict::classify(0.1), DaIIVerdict::Intermediate);
        assert_eq!(DaIIVerdict::classify(0.05), DaIIVerdict::KineticallyLimited);
        assert_eq!(
            DaIIVerdict::MassTransferLimited.to_string(),
            "Mass Transfer Limited"
        );
    }

    #[test]
    fn set_reports_limiting_mechanisms() {
        let set = DamkohlerSet::evaluate(2.0, 0.1, Some(3.0), 0.0);
        assert_eq!(set.micro, 0.2);
        assert_eq!(set.macro_, Some(6.0));
        assert_eq!(
            set.limiting(),
            vec![Mechanism::Macromixing, Mechanism::MassTransfer]
        );
    }

    #[test]
    fn undefined_macro_is_not_limited() {
        let set = DamkohlerSet::evaluate(2.0, 0.1, None, 10.0);
        assert!(!set.is_limited_by(Mechanism::Macromixing));
        assert!(set.limiting().is_empty());
    }

    #[test]
    fn relative_deviation_rejects_zero_center() {
        assert!(matches!(
            relative_deviation(5.0, 0.0),
            Err(AnalysisError::Precondition { .. })
        ));
        assert!(relative_deviation(5.0, f64::NAN).is_err());
        assert!(relative_deviation(f64::NAN, 5.0).is_err());
    }

    #[test]
    fn relative_deviation_keeps_center_sign() {
        let d = relative_deviation(85.0, 100.0).expect("finite");
        assert!((d - 0.15).abs() < 1e-12);
        let d = relative_deviation(-80.0, -100.0).expect("finite");
        assert!((d + 0.2).abs() < 1e-12);
    }
}
