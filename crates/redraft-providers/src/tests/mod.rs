//! Unit tests for `redraft-providers`.
