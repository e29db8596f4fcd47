//! mx-core: shared foundation for mixsense.
//!
//! Contains:
//! - units (uom SI types, constructors, and the engineering-unit conversions
//!   used by the stirred-tank correlations)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{MxError, MxResult};
pub use numeric::*;
pub use units::*;
