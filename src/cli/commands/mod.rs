//! CLI command handlers for `creditaudit`.
//!
//! Each command is implemented in its own submodule.

pub mod analyze;
pub mod config;
pub mod departments;

use credit_audit::config::Config;
use credit_audit::error;
use credit_audit::requirements::RequirementStore;

/// The process-wide requirement store, loaded from `config` on first use
///
/// # Errors
/// Returns a printable message if the requirement table cannot be loaded
pub fn requirement_store(config: &Config) -> Result<&'static RequirementStore, String> {
    if let Some(store) = RequirementStore::global() {
        return Ok(store);
    }
    let store = config.load_requirements().map_err(|e| {
        error!("Requirement table load failed: {e}");
        format!("✗ Failed to load requirements: {e}")
    })?;
    Ok(RequirementStore::init_global(store))
}
