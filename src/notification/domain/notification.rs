//! Rendered notifications.

use super::{MutationKind, NotificationError, TaskMutation};
use crate::percent::count_u64;
use crate::task::domain::{TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Namespace for notification identifiers derived from deliveries.
const DELIVERY_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2b8e_4d7a_5c93_a1e0_3f6b_9d2c_7e54);

/// Unique notification identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Generates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derives the identifier of the notification telling `recipient` about
    /// `mutation`.
    ///
    /// The same mutation delivered to the same recipient always yields the
    /// same identifier.
    #[must_use]
    pub fn for_delivery(mutation: &TaskMutation, recipient: &UserId) -> Self {
        let name = format!(
            "{}|{}|{}|{}|{recipient}",
            mutation.task_id,
            mutation.actor,
            mutation.occurred_at.to_rfc3339(),
            mutation.kind.fingerprint(),
        );
        Self(Uuid::new_v5(&DELIVERY_NAMESPACE, name.as_bytes()))
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message delivered to one recipient about one task mutation.
///
/// Everything except the read flag is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    task_id: TaskId,
    kind: MutationKind,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification for `recipient`.
    ///
    /// The identifier is derived from the mutation and recipient, see
    /// [`NotificationId::for_delivery`].
    #[must_use]
    pub fn new(
        recipient: UserId,
        mutation: &TaskMutation,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: NotificationId::for_delivery(mutation, &recipient),
            recipient,
            task_id: mutation.task_id,
            kind: mutation.kind.clone(),
            message: message.into(),
            read: false,
            created_at: clock.utc(),
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> &UserId {
        &self.recipient
    }

    /// Returns the task the notification is about.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the mutation that caused the notification.
    #[must_use]
    pub const fn kind(&self) -> &MutationKind {
        &self.kind
    }

    /// Returns the rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` once the recipient has read the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the notification read. Repeated calls have no further effect.
    pub const fn mark_as_read(&mut self) {
        self.read = true;
    }
}

/// Marks the identified notification read.
///
/// # Errors
///
/// Returns [`NotificationError::NotificationNotFound`] when no notification
/// in `notifications` carries `id`.
pub fn mark_as_read(
    notifications: &mut [Notification],
    id: NotificationId,
) -> Result<(), NotificationError> {
    let notification = notifications
        .iter_mut()
        .find(|notification| notification.id == id)
        .ok_or(NotificationError::NotificationNotFound(id))?;
    notification.mark_as_read();
    Ok(())
}

/// Number of unread notifications addressed to `recipient`.
#[must_use]
pub fn unread_count(notifications: &[Notification], recipient: &UserId) -> u64 {
    count_u64(
        notifications
            .iter()
            .filter(|notification| &notification.recipient == recipient && !notification.read)
            .count(),
    )
}
