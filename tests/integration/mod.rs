//! Integration tests for tree generation through the CLI layer

mod config_errors;
mod determinism;
mod generate_tree;
mod support;
