//! Shared plumbing for the catalog crates: tracing setup and response types.

pub mod types;
pub mod utils;
