//! Application services for time tracking.

mod timer;

pub use timer::{StartTimerRequest, TimeTrackingConfig, TimeTrackingService};
