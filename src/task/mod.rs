//! Task workflow engine.
//!
//! Validates status transitions against the workflow graph, applies board
//! and checklist reorderings atomically, records the append-only history
//! trail, and guards parent/child lookups against cyclic data. The module
//! follows the same split as the rest of the crate:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
