//! mx-system: typed description of what is being mixed and where.
//!
//! Provides:
//! - Mixture components and the mass-weighted mixing rule that yields
//!   [`PhysicalProperties`] for the working mixture and its solid phase
//! - Reactor vessels: geometry, impellers, operating envelope and
//!   vessel-specific correlation constants
//! - Operating points (agitation + liquid volume)
//! - Reaction rate records
//!
//! Values are stored as uom quantities so a viscosity can never be read in
//! the wrong unit; the correlation library is fed through the `in_*` readers
//! in `mx_core::units`.

pub mod error;
pub mod mixture;
pub mod operating;
pub mod reaction;
pub mod reactor;

pub use error::{SystemError, SystemResult};
pub use mixture::{ComponentInput, Mixture, Phase, PhysicalProperties, SolidPhase};
pub use operating::OperatingPoint;
pub use reaction::ReactionRate;
pub use reactor::{
    Fill, Impeller, OperatingEnvelope, Reactor, ReactorConstants, ReactorGeometry, Scale,
};
