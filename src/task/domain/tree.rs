//! Parent/child lookups over a task snapshot.
//!
//! `parent_task_id` is a back reference only. The stored data does not
//! forbid cycles, so every walk tracks visited nodes and fails with
//! [`TaskDomainError::CycleDetected`] instead of looping.

use super::{Task, TaskDomainError, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Index of a task snapshot by id and by parent.
#[derive(Debug)]
pub struct TaskTree<'a> {
    tasks: HashMap<TaskId, &'a Task>,
    children: BTreeMap<TaskId, Vec<TaskId>>,
}

/// Aggregate over all descendants of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskRollup {
    /// Number of descendant tasks.
    pub total_subtasks: usize,
    /// Number of descendants in `FINISHED`.
    pub finished_subtasks: usize,
    /// Story points across descendants.
    pub total_story_points: u64,
    /// Story points across finished descendants.
    pub completed_story_points: u64,
}

impl<'a> TaskTree<'a> {
    /// Indexes a snapshot.
    #[must_use]
    pub fn new(tasks: &'a [Task]) -> Self {
        let mut index = HashMap::with_capacity(tasks.len());
        let mut children: BTreeMap<TaskId, Vec<TaskId>> = BTreeMap::new();
        for task in tasks {
            index.insert(task.id, task);
            if let Some(parent_id) = task.parent_task_id {
                children.entry(parent_id).or_default().push(task.id);
            }
        }
        for siblings in children.values_mut() {
            siblings.sort_unstable();
        }
        Self {
            tasks: index,
            children,
        }
    }

    /// Looks up a task.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&'a Task> {
        self.tasks.get(&id).copied()
    }

    /// Direct children of a task, by ascending id.
    #[must_use]
    pub fn children(&self, id: TaskId) -> &[TaskId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Parent chain of a task, nearest first.
    ///
    /// A parent id missing from the snapshot ends the chain.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] when `id` is not in the
    /// snapshot and [`TaskDomainError::CycleDetected`] when the chain loops.
    pub fn ancestors(&self, id: TaskId) -> Result<Vec<TaskId>, TaskDomainError> {
        let mut current = self.get(id).ok_or(TaskDomainError::TaskNotFound(id))?;
        let mut visited = HashSet::from([id]);
        let mut chain = Vec::new();
        while let Some(parent_id) = current.parent_task_id {
            if !visited.insert(parent_id) {
                return Err(TaskDomainError::CycleDetected(id));
            }
            chain.push(parent_id);
            match self.get(parent_id) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Ok(chain)
    }

    /// All descendants of a task in depth-first order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] when `id` is not in the
    /// snapshot and [`TaskDomainError::CycleDetected`] when a descendant
    /// leads back to an already visited task.
    pub fn descendants(&self, id: TaskId) -> Result<Vec<TaskId>, TaskDomainError> {
        if self.get(id).is_none() {
            return Err(TaskDomainError::TaskNotFound(id));
        }
        let mut visited = HashSet::from([id]);
        let mut stack: Vec<TaskId> = self.children(id).iter().rev().copied().collect();
        let mut found = Vec::new();
        while let Some(next) = stack.pop() {
            if !visited.insert(next) {
                return Err(TaskDomainError::CycleDetected(next));
            }
            found.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        Ok(found)
    }

    /// Aggregates story points and completion over a task's descendants.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`TaskTree::descendants`].
    pub fn subtask_rollup(&self, id: TaskId) -> Result<SubtaskRollup, TaskDomainError> {
        let rollup = self
            .descendants(id)?
            .into_iter()
            .filter_map(|descendant| self.get(descendant))
            .fold(SubtaskRollup::default(), |mut acc, task| {
                let points = u64::from(task.points());
                acc.total_subtasks += 1;
                acc.total_story_points += points;
                if task.is_finished() {
                    acc.finished_subtasks += 1;
                    acc.completed_story_points += points;
                }
                acc
            });
        Ok(rollup)
    }

    /// Checks whether `child` may be re-parented under `proposed_parent`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SelfParent`] when both ids are equal,
    /// [`TaskDomainError::TaskNotFound`] when either task is missing, and
    /// [`TaskDomainError::CycleDetected`] when `proposed_parent` descends from
    /// `child` or already sits on a looping chain.
    pub fn validate_parent(
        &self,
        child: TaskId,
        proposed_parent: TaskId,
    ) -> Result<(), TaskDomainError> {
        if child == proposed_parent {
            return Err(TaskDomainError::SelfParent(child));
        }
        if self.get(child).is_none() {
            return Err(TaskDomainError::TaskNotFound(child));
        }
        let ancestors = self.ancestors(proposed_parent)?;
        if ancestors.contains(&child) {
            return Err(TaskDomainError::CycleDetected(child));
        }
        Ok(())
    }
}
