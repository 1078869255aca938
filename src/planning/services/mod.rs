//! Planning services: rollups, burndown, velocity, and lifecycles.

mod burndown;
mod lifecycle;
mod rollup;
mod velocity;

pub use burndown::{BurndownPoint, burndown};
pub use lifecycle::{EpicLifecycleService, SprintLifecycleService, SprintTransitionRequest};
pub use rollup::{
    CapacityUsage, TaskRollup, capacity_usage, completion_by_count, epic_rollup, epic_tasks,
    sprint_rollup, sprint_tasks, status_breakdown, unestimated_tasks,
};
pub use velocity::{SprintVelocity, VelocityReport, velocity};
