//! External process execution
//!
//! [`BinaryLocator`] turns a binary name into a program path,
//! [`ProcessRunner`] spawns it and drains both pipes, and [`ErrorExtractor`]
//! picks the tool's own failure reason out of stderr.

mod decode;
mod locator;
mod runner;
mod stderr;

pub use locator::BinaryLocator;
pub use runner::ProcessRunner;
pub use stderr::ErrorExtractor;
