//! Sprint and epic planning: lifecycles and derived metrics.
//!
//! Rollups, burndown, and velocity are computed from task snapshots on
//! demand. Nothing derived here is stored on the sprint or epic entities.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
