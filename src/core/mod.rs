//! Core module: classification, inference and deficit analysis

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod deficit;
pub mod error;
pub mod inference;
pub mod models;
pub mod recommend;
pub mod requirements;
pub mod taxonomy;

/// Returns the current version of the `credit_audit` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
