//! Four-week rotation tracking.
//!
//! This crate provides:
//! - [`rotation`]: date → week type math anchored to a configured date
//! - [`gate`]: the Sunday send-time predicate and announcement text
//! - [`time_source`]: injectable "now" in the configured timezone
//! - [`config`]: JSON config loading and validation
//! - [`roster`] and [`search`]: the weekly schedule table and member lookup

pub mod config;
pub mod error;
pub mod gate;
pub mod roster;
pub mod rotation;
pub mod search;
pub mod time_source;

pub use config::{RotationConfig, RotationLabels};
pub use error::ConfigError;
pub use gate::{should_fire_now, Announcement, LocalInstant, SendTime};
pub use rotation::{current_and_next, rotation_index, RotationClock, RotationIndex, WeekPair};
pub use time_source::{FixedTimeSource, SystemTimeSource, TimeSource};
