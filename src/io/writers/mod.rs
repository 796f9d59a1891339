//! Image writers used by the debug sinks and the CLI.
pub mod jpeg;
