//! Test suites for the redraft daemon.

mod dispatch_behaviour;
pub(crate) mod support;
