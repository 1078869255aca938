//! Time tracking for tasks.
//!
//! Computes duration, earnings, and calendar-period statistics from time
//! entries, and validates timer starts and stops. The current time is always
//! supplied through a [`mockable::Clock`] so results are reproducible.
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
