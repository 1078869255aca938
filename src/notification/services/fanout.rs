//! Recipient planning and message rendering for task mutations.

use crate::notification::domain::{
    MutationKind, Notification, NotificationError, TaskMutation, WatcherList,
};
use crate::task::domain::{TaskId, UserId};
use minijinja::Environment;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Rule that subscribes a user to a task as a side effect of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImplicitWatchRule {
    /// A newly assigned user starts watching the task.
    AssigneeWatches,
}

impl ImplicitWatchRule {
    /// Every rule, in evaluation order.
    pub const ALL: [Self; 1] = [Self::AssigneeWatches];

    /// The user this rule subscribes for `kind`, if any.
    #[must_use]
    pub const fn subject(self, kind: &MutationKind) -> Option<&UserId> {
        match (self, kind) {
            (
                Self::AssigneeWatches,
                MutationKind::AssignmentChanged {
                    new_assignee: Some(assignee),
                    ..
                },
            ) => Some(assignee),
            _ => None,
        }
    }
}

/// A watcher the caller should add because a rule fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplicitWatch {
    /// User to subscribe.
    pub user_id: UserId,
    /// Rule that produced the subscription.
    pub rule: ImplicitWatchRule,
}

/// Who hears about a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanoutPlan {
    /// Task the mutation concerns.
    pub task_id: TaskId,
    /// Users to notify, each exactly once.
    pub recipients: BTreeSet<UserId>,
    /// Users who are not yet watching but should be.
    pub implicit_watchers: Vec<ImplicitWatch>,
}

/// Message templates per mutation kind, rendered with `minijinja`.
///
/// Every template sees `task_id`, `task_title`, `actor`, `recipient` and
/// `kind`; status changes add `from`/`to`, comments add `author`, and
/// assignment changes add `previous`/`new_assignee`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct NotificationTemplates {
    /// Template for status changes.
    pub status_changed: String,
    /// Template for new comments.
    pub comment_added: String,
    /// Template for assignment changes.
    pub assignment_changed: String,
    /// Template for deletions.
    pub deleted: String,
}

impl NotificationTemplates {
    fn for_kind(&self, kind: &MutationKind) -> &str {
        match kind {
            MutationKind::StatusChanged { .. } => &self.status_changed,
            MutationKind::CommentAdded { .. } => &self.comment_added,
            MutationKind::AssignmentChanged { .. } => &self.assignment_changed,
            MutationKind::Deleted => &self.deleted,
        }
    }
}

impl Default for NotificationTemplates {
    fn default() -> Self {
        Self {
            status_changed: "{{ actor }} moved task #{{ task_id }} \"{{ task_title }}\" from {{ from }} to {{ to }}".to_owned(),
            comment_added: "{{ author }} commented on task #{{ task_id }} \"{{ task_title }}\"".to_owned(),
            assignment_changed: concat!(
                "{% if new_assignee %}{{ actor }} assigned task #{{ task_id }} \"{{ task_title }}\" to {{ new_assignee }}",
                "{% else %}{{ actor }} unassigned task #{{ task_id }} \"{{ task_title }}\"{% endif %}",
            )
            .to_owned(),
            deleted: "{{ actor }} deleted task #{{ task_id }} \"{{ task_title }}\"".to_owned(),
        }
    }
}

/// Settings for notification fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct NotificationConfig {
    /// Skip notifying the user who made the change.
    pub exclude_actor: bool,
    /// Message templates.
    pub templates: NotificationTemplates,
}

/// Plans recipients for task mutations and renders their notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationFanout {
    config: NotificationConfig,
}

impl NotificationFanout {
    /// Creates a fan-out with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fan-out with a custom configuration.
    #[must_use]
    pub const fn with_config(config: NotificationConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Works out who hears about `mutation`.
    ///
    /// Recipients are the task's current watchers plus the subjects of any
    /// [`ImplicitWatchRule`]. Subjects who are not yet watching are listed
    /// in [`FanoutPlan::implicit_watchers`] for the caller to persist. With
    /// `exclude_actor` set, the acting user is dropped from the recipients
    /// but may still become an implicit watcher.
    #[must_use]
    pub fn plan(&self, watchers: &WatcherList, mutation: &TaskMutation) -> FanoutPlan {
        let mut recipients: BTreeSet<UserId> = watchers
            .watchers_of(mutation.task_id)
            .map(|watcher| watcher.user_id.clone())
            .collect();

        let mut implicit_watchers = Vec::new();
        for rule in ImplicitWatchRule::ALL {
            let Some(subject) = rule.subject(&mutation.kind) else {
                continue;
            };
            recipients.insert(subject.clone());
            if !watchers.is_watching(mutation.task_id, subject) {
                implicit_watchers.push(ImplicitWatch {
                    user_id: subject.clone(),
                    rule,
                });
            }
        }

        if self.config.exclude_actor {
            recipients.remove(&mutation.actor);
        }

        debug!(
            task_id = %mutation.task_id,
            mutation = mutation.kind.as_str(),
            recipients = recipients.len(),
            implicit_watchers = implicit_watchers.len(),
            "fan-out planned"
        );
        FanoutPlan {
            task_id: mutation.task_id,
            recipients,
            implicit_watchers,
        }
    }

    /// Renders one notification per planned recipient, in recipient order.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::TemplateRender`] when the template for
    /// the mutation kind fails to render; no notifications are produced.
    pub fn notify(
        &self,
        plan: &FanoutPlan,
        mutation: &TaskMutation,
        clock: &impl Clock,
    ) -> Result<Vec<Notification>, NotificationError> {
        let environment = Environment::new();
        let template = self.config.templates.for_kind(&mutation.kind);
        let notifications = plan
            .recipients
            .iter()
            .map(|recipient| {
                let context = build_template_context(mutation, recipient);
                environment
                    .render_str(template, context)
                    .map(|message| Notification::new(recipient.clone(), mutation, message, clock))
                    .map_err(|error| NotificationError::TemplateRender {
                        mutation: mutation.kind.as_str(),
                        reason: error.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            task_id = %mutation.task_id,
            mutation = mutation.kind.as_str(),
            count = notifications.len(),
            "notifications rendered"
        );
        Ok(notifications)
    }

    /// Persists a plan's implicit watchers into `watchers`.
    pub fn apply_implicit_watches(
        &self,
        watchers: &mut WatcherList,
        plan: &FanoutPlan,
        clock: &impl Clock,
    ) {
        for implicit in &plan.implicit_watchers {
            watchers.add(plan.task_id, implicit.user_id.clone(), clock);
        }
    }
}

fn build_template_context(mutation: &TaskMutation, recipient: &UserId) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert("task_id".to_owned(), Value::from(mutation.task_id.value()));
    context.insert("task_title".to_owned(), Value::from(mutation.task_title.as_str()));
    context.insert("actor".to_owned(), Value::from(mutation.actor.as_str()));
    context.insert("recipient".to_owned(), Value::from(recipient.as_str()));
    context.insert("kind".to_owned(), Value::from(mutation.kind.as_str()));
    match &mutation.kind {
        MutationKind::StatusChanged { from, to } => {
            context.insert("from".to_owned(), Value::from(from.as_str()));
            context.insert("to".to_owned(), Value::from(to.as_str()));
        }
        MutationKind::CommentAdded { author } => {
            context.insert("author".to_owned(), Value::from(author.as_str()));
        }
        MutationKind::AssignmentChanged {
            previous,
            new_assignee,
        } => {
            context.insert("previous".to_owned(), optional_user(previous.as_ref()));
            context.insert("new_assignee".to_owned(), optional_user(new_assignee.as_ref()));
        }
        MutationKind::Deleted => {}
    }
    context
}

fn optional_user(user: Option<&UserId>) -> Value {
    user.map_or(Value::Null, |id| Value::from(id.as_str()))
}
