//! Outbound delivery of the weekly rotation announcement.
//!
//! This crate provides:
//! - `Notifier` trait for pluggable message channels
//! - Webhook (Discord `content` payload) and dry-run notifier implementations
//! - `WeeklyAnnouncer`, which runs one scheduler tick: gate check, rotation
//!   lookup and delivery

pub mod announcer;
pub mod dry_run;
pub mod traits;
pub mod webhook;

pub use announcer::{TickOutcome, WeeklyAnnouncer};
pub use dry_run::DryRunNotifier;
pub use traits::{Notifier, NotifyError};
pub use webhook::WebhookNotifier;
