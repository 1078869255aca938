//! Sprint and epic domain types.

mod epic;
mod error;
mod sprint;

pub use epic::{Epic, EpicStatus};
pub use error::{ParseEpicStatusError, ParseSprintStatusError, PlanningError};
pub use sprint::{Sprint, SprintStatus};
