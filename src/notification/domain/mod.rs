//! Watcher and notification domain types.

mod error;
mod mutation;
mod notification;
mod watcher;

pub use error::NotificationError;
pub use mutation::{MutationKind, TaskMutation};
pub use notification::{Notification, NotificationId, mark_as_read, unread_count};
pub use watcher::{Watcher, WatcherList};
