//! Unit tests for `redraft_core`.

mod diff_tests;
mod metrics_tests;
