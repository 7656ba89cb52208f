//! Settings composition.

pub mod policy;
pub mod service;
