//! Tooling & Integration Layer
//!
//! Command-line surface over the library: argument parsing and command dispatch.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
