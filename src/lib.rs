//! Transcript credit audit library
//!
//! Classifies transcript courses into an academic requirement taxonomy,
//! infers the student's department, and reports graduation credit
//! deficits. Used by the `creditaudit` CLI.

pub mod core;
pub mod logger;

pub use crate::core::*;
