//! mx-correlations: stirred-tank engineering correlations.
//!
//! Provides pure, stateless functions for:
//! - Fluid dynamics (Reynolds number, impeller power, tip speed, shear rates)
//! - Flow regime classification
//! - Mixing times (empirical and regime-dependent bulk blending, micromixing)
//! - Gas-liquid mass transfer by surface gas drawdown
//! - Particle just-suspended speed (Zwietering and Grenville-Mak-Brown)
//! - Vessel dish geometry
//!
//! Every function takes raw `f64` values in the units listed on that function.
//! The units are deliberately mixed (rpm, cP, litres) to match the published
//! correlations, so conversions belong to the caller; see `mx_core::units`.
//!
//! # Example
//!
//! ```
//! use mx_correlations::{power_input, reynolds, FlowRegime};
//!
//! // Water, 0.1 m impeller at 300 rpm
//! let re = reynolds(1000.0, 0.1, 300.0, 1.0);
//! assert_eq!(FlowRegime::from_reynolds(re), FlowRegime::Turbulent);
//!
//! let p = power_input(5.0, 1000.0, 300.0, 0.1);
//! assert!(p > 0.0);
//! ```

pub mod error;
pub mod fluid_dynamics;
pub mod geometry;
pub mod mass_transfer;
pub mod mixing_time;
pub mod suspension;

pub use error::{CorrelationError, CorrelationResult};
pub use fluid_dynamics::{
    FlowRegime, format_reynolds, power_input, reynolds, shear_impeller, shear_vessel, tip_speed,
};
pub use geometry::{DishType, dish_volume};
pub use mass_transfer::{
    DEFAULT_KLA_A, DEFAULT_KLA_B, GassingSystem, gas_drawdown_min_speed, kla_gas_drawdown,
    kla_gas_drawdown_submerged,
};
pub use mixing_time::{
    kolmogorov_length, micromixing_rate, micromixing_time, mixing_time_regime,
    mixing_time_simple,
};
pub use suspension::{GmbInputs, ZwieteringInputs, njs_gmb, njs_zwietering};
