//! mx-analysis: Damköhler/sensitivity evaluation and operating-envelope sweeps.
//!
//! Provides:
//! - Damköhler numbers for micromixing, macromixing and gas-liquid mass
//!   transfer, with the Da > 1 limitation rule and the Da II bands
//! - Suspension and gas-drawdown banding of speed ratios
//! - A shared per-point hydrodynamic evaluation (power, regime, mixing
//!   times, kLa)
//! - The mixing summary at an operating point
//! - Performance curves against agitation speed
//! - The sensitivity grid and the multi-vessel scale sweep

pub mod banding;
pub mod curves;
pub mod damkohler;
pub mod error;
pub mod point;
pub mod summary;
pub mod sweep;

#[cfg(test)]
mod test_support;

pub use banding::{
    DrawdownCondition, SuspensionQuality, agitation_headroom_pct, drawdown_headroom_pct,
};
pub use curves::{CURVE_POINTS, PerformanceCurves, performance_curves};
pub use damkohler::{
    DaIIVerdict, DamkohlerSet, LIMIT_THRESHOLD, Limitation, Mechanism, da_macro,
    da_mass_transfer, da_micro, relative_deviation,
};
pub use error::{AnalysisError, AnalysisResult};
pub use point::{KlaModel, PointState, PowerBasis, evaluate_point, total_power};
pub use summary::{
    DaII, DrawdownEstimate, MixingSummary, NjsCorrelation, NjsEstimate, SummaryOptions,
    mixing_summary,
};
pub use sweep::{
    LimitedRow, ScaleRow, SensitivityRow, SkippedVolume, SweepResult, SweepSettings, scale_sweep,
    sensitivity_grid,
};
