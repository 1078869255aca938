//! Unit tests for the time tracking module.

mod stats_tests;
