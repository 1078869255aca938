//! Task watchers.

use crate::percent::count_u64;
use crate::task::domain::{TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A user subscribed to a task's changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watcher {
    /// Watched task.
    pub task_id: TaskId,
    /// Subscribed user.
    pub user_id: UserId,
    /// When the subscription was created.
    pub created_at: DateTime<Utc>,
}

impl Watcher {
    fn is_pair(&self, task_id: TaskId, user_id: &UserId) -> bool {
        self.task_id == task_id && &self.user_id == user_id
    }
}

/// Snapshot of watcher subscriptions, unique per (task, user) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Watcher>", into = "Vec<Watcher>")]
pub struct WatcherList {
    watchers: Vec<Watcher>,
}

impl WatcherList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            watchers: Vec::new(),
        }
    }

    /// Subscribes `user_id` to `task_id` and returns the subscription.
    ///
    /// Adding a pair that already exists returns the existing record
    /// unchanged, including its original `created_at`.
    pub fn add(&mut self, task_id: TaskId, user_id: UserId, clock: &impl Clock) -> Watcher {
        if let Some(existing) = self
            .watchers
            .iter()
            .find(|watcher| watcher.is_pair(task_id, &user_id))
        {
            debug!(task_id = %task_id, user_id = %user_id, "watcher already present");
            return existing.clone();
        }
        debug!(task_id = %task_id, user_id = %user_id, "watcher added");
        let watcher = Watcher {
            task_id,
            user_id,
            created_at: clock.utc(),
        };
        self.watchers.push(watcher.clone());
        watcher
    }

    /// Unsubscribes the pair, returning the removed record.
    ///
    /// Removing an absent pair is a no-op.
    pub fn remove(&mut self, task_id: TaskId, user_id: &UserId) -> Option<Watcher> {
        let position = self
            .watchers
            .iter()
            .position(|watcher| watcher.is_pair(task_id, user_id))?;
        Some(self.watchers.remove(position))
    }

    /// Drops every subscription to a task, returning how many were removed.
    pub fn remove_task(&mut self, task_id: TaskId) -> u64 {
        let before = self.watchers.len();
        self.watchers.retain(|watcher| watcher.task_id != task_id);
        count_u64(before.saturating_sub(self.watchers.len()))
    }

    /// Returns `true` when the user watches the task.
    #[must_use]
    pub fn is_watching(&self, task_id: TaskId, user_id: &UserId) -> bool {
        self.watchers
            .iter()
            .any(|watcher| watcher.is_pair(task_id, user_id))
    }

    /// Watchers of a task in subscription order.
    pub fn watchers_of(&self, task_id: TaskId) -> impl Iterator<Item = &Watcher> {
        self.watchers
            .iter()
            .filter(move |watcher| watcher.task_id == task_id)
    }

    /// Tasks a user watches in subscription order.
    pub fn watched_by<'a>(&'a self, user_id: &'a UserId) -> impl Iterator<Item = TaskId> + 'a {
        self.watchers
            .iter()
            .filter(move |watcher| &watcher.user_id == user_id)
            .map(|watcher| watcher.task_id)
    }

    /// Number of watchers of a task.
    #[must_use]
    pub fn count_for(&self, task_id: TaskId) -> u64 {
        count_u64(self.watchers_of(task_id).count())
    }

    /// Every subscription in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Watcher> {
        self.watchers.iter()
    }

    /// Total number of subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.watchers.len()
    }

    /// Returns `true` when nobody watches anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watchers.is_empty()
    }
}

impl FromIterator<Watcher> for WatcherList {
    /// Collects watchers, keeping the first record of each duplicated pair.
    fn from_iter<I: IntoIterator<Item = Watcher>>(iter: I) -> Self {
        let mut list = Self::new();
        for watcher in iter {
            if !list.is_watching(watcher.task_id, &watcher.user_id) {
                list.watchers.push(watcher);
            }
        }
        list
    }
}

impl From<Vec<Watcher>> for WatcherList {
    fn from(watchers: Vec<Watcher>) -> Self {
        watchers.into_iter().collect()
    }
}

impl From<WatcherList> for Vec<Watcher> {
    fn from(list: WatcherList) -> Self {
        list.watchers
    }
}
