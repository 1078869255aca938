//! Engine-wide configuration.

use crate::notification::services::NotificationConfig;
use crate::task::services::TransitionPolicy;
use crate::time_tracking::services::TimeTrackingConfig;
use serde::{Deserialize, Serialize};

/// Settings for every engine service, typically loaded by the host from a
/// JSON document.
///
/// Missing sections fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineConfig {
    /// Task workflow rules.
    pub task: TransitionPolicy,
    /// Time tracking settings.
    pub time_tracking: TimeTrackingConfig,
    /// Notification fan-out settings.
    pub notifications: NotificationConfig,
}

impl EngineConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns the parser error when the document is not valid JSON or
    /// names unknown enum values.
    pub fn from_json_str(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }
}
