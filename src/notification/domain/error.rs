//! Error types for notifications.

use super::NotificationId;
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned by notification operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    /// A message template failed to render.
    #[error("template rendering failed for {mutation} notifications: {reason}")]
    TemplateRender {
        /// Mutation kind whose template failed.
        mutation: &'static str,
        /// Renderer diagnostic.
        reason: String,
    },

    /// The notification is not part of the snapshot.
    #[error("notification {0} not found")]
    NotificationNotFound(NotificationId),
}

impl NotificationError {
    /// Classifies the error for callers mapping failures onto responses.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TemplateRender { .. } => ErrorKind::ValidationError,
            Self::NotificationNotFound(_) => ErrorKind::NotFound,
        }
    }
}
