//! Sprintkit: lifecycle and aggregation engine for agile project tracking.
//!
//! The crate validates task, sprint and epic status changes and derives
//! statistics (progress, burndown, velocity, time totals) from in-memory
//! snapshots supplied by the caller. It performs no I/O: persistence,
//! transport and presentation belong to the host application.
//!
//! # Modules
//!
//! - [`task`]: task workflow, reordering, checklists, history and sub-task
//!   trees
//! - [`time_tracking`]: time entries, timers and time statistics
//! - [`planning`]: sprint and epic lifecycles, rollups, burndown and
//!   velocity
//! - [`notification`]: watchers and notification fan-out
//! - [`config`]: engine-wide settings
//! - [`error`]: crate-level error classification
//!
//! Every operation that needs the current time takes a
//! [`mockable::Clock`], so results are deterministic under test.

pub mod config;
pub mod error;
pub mod notification;
mod percent;
pub mod planning;
pub mod task;
pub mod time_tracking;

#[cfg(test)]
mod test_support;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult, ErrorKind};
