//! CLI command implementations.

pub mod build;
pub mod classify;
pub mod common;
pub mod embed;
pub mod version;
