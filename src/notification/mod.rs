//! Task watchers and notification fan-out.
//!
//! Watchers subscribe to tasks. Every task mutation is planned into a set of
//! recipients, which are then rendered into write-once notifications.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
