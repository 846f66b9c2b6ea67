//! Library components for the Aurora CLI.

pub mod logging;
