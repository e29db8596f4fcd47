//! Operating-speed ratios read against a critical speed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Solids suspension quality from `N / Njs`.
///
/// Each band includes its lower edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuspensionQuality {
    Suspended,
    JustSuspended,
    MaybeSuspended,
    NotSuspended,
}

impl SuspensionQuality {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 1.2 {
            Self::Suspended
        } else if ratio >= 1.0 {
            Self::JustSuspended
        } else if ratio >= 0.8 {
            Self::MaybeSuspended
        } else {
            Self::NotSuspended
        }
    }
}

impl fmt::Display for SuspensionQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suspended => write!(f, "Suspended"),
            Self::JustSuspended => write!(f, "Just Suspended"),
            Self::MaybeSuspended => write!(f, "Maybe Suspended"),
            Self::NotSuspended => write!(f, "Not Suspended"),
        }
    }
}

/// Headspace gas drawdown from `N / N_min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawdownCondition {
    Drawdown,
    Possible,
    None,
}

impl DrawdownCondition {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 1.0 {
            Self::Drawdown
        } else if ratio >= 0.8 {
            Self::Possible
        } else {
            Self::None
        }
    }
}

impl fmt::Display for DrawdownCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drawdown => write!(f, "Gas drawdown"),
            Self::Possible => write!(f, "Possible gas drawdown"),
            Self::None => write!(f, "No gas drawdown"),
        }
    }
}

/// Spare agitation above the set point, in percent of the set point.
pub fn agitation_headroom_pct(n_rpm: f64, n_max_rpm: f64) -> f64 {
    (n_max_rpm - n_rpm) / n_rpm * 100.0
}

/// Share of the agitation range above the drawdown onset, in percent of max.
pub fn drawdown_headroom_pct(n_max_rpm: f64, n_min_drawdown_rpm: f64) -> f64 {
    (n_max_rpm - n_min_drawdown_rpm) / n_max_rpm * 100.0
}
