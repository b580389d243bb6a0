//! Departments command handler

use credit_audit::config::Config;
use credit_audit::requirements::RequirementStore;

/// List every department in the configured requirement table.
///
/// # Errors
/// Returns a printable message if the requirement table cannot be loaded
pub fn run(config: &Config) -> Result<(), String> {
    let store = super::requirement_store(config)?;
    print!("{}", render(store));
    Ok(())
}

fn render(store: &RequirementStore) -> String {
    let mut out = String::new();
    for name in store.departments() {
        if let Some(requirement) = store.get(name) {
            out.push_str(&format!("{name} ({} credits)\n", requirement.graduation_credits));
        }
    }
    out
}
