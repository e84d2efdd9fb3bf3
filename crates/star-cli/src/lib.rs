//! Library components of the `star-schema` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod types;
