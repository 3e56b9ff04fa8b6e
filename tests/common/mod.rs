//! Common test utilities for sevenz-cmd integration tests

#[allow(dead_code)]
pub mod fake_tool;
#[allow(dead_code)]
pub mod fixtures;

pub use fake_tool::*;
#[allow(unused_imports)]
pub use fixtures::*;
