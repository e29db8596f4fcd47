//! mx-bourne: the staged Bourne protocol for diagnosing which mixing scale
//! limits a fast reaction.
//!
//! Provides:
//! - Stage designs (stir speed, feed rate, feed location) around a
//!   centerpoint
//! - The relative-deviation decision rule and stage verdict labels
//! - A pure state machine with one-way stage gating and full reset
//!
//! # Example
//!
//! ```
//! use mx_bourne::{BourneProtocol, Centerpoint, Event, Level, Phase, Stage};
//!
//! let p = BourneProtocol::default()
//!     .apply(Event::BeginStirSpeed {
//!         centerpoint: Centerpoint::new(200.0, 50.0).unwrap(),
//!     })
//!     .unwrap();
//! let mut p = p;
//! for (level, kpi) in [(Level::Low, 85.0), (Level::Center, 100.0), (Level::High, 105.0)] {
//!     p = p
//!         .apply(Event::SetKpi { stage: Stage::StirSpeed, level, value: Some(kpi) })
//!         .unwrap();
//! }
//! let p = p.apply(Event::Run { stage: Stage::StirSpeed }).unwrap();
//! assert_eq!(p.phase(), Phase::Stage1Done);
//! assert!(p.result(Stage::StirSpeed));
//! ```

pub mod decision;
pub mod error;
pub mod protocol;
pub mod stage;

pub use decision::{DEFAULT_THRESHOLD, StageOutcome, decide, decide_table, parse_kpi};
pub use error::{BourneError, BourneResult};
pub use protocol::{BourneConfig, BourneProtocol, CenterpointPolicy, Event, Phase, StageRecord};
pub use stage::{
    Centerpoint, ConditionRow, ConditionTable, FeedLocation, Level, Stage, design_feed_location,
    design_feed_rate, design_stir_speed,
};
