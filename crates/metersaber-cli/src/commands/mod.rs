//! CLI command implementations.

pub mod bpm;
pub mod convert;
