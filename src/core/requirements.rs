//! Per-department graduation requirements
//!
//! The store is a read-only lookup table keyed by department name. A
//! process-wide instance can be installed once with
//! [`RequirementStore::init_global`]; concurrent first access is guarded
//! by a `OnceLock`, so the document is loaded exactly once.

use crate::core::error::RequirementError;
use crate::core::models::Requirement;
use crate::warn;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Compiled-in requirement table
const REQUIREMENT_DEFAULTS: &str = include_str!("../../assets/requirements.json");

static GLOBAL_STORE: OnceLock<RequirementStore> = OnceLock::new();

/// Requirement records keyed by department name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementStore {
    by_department: HashMap<String, Requirement>,
}

impl RequirementStore {
    /// Build a store from records; records without a department name are skipped
    #[must_use]
    pub fn from_records<I: IntoIterator<Item = Requirement>>(records: I) -> Self {
        let mut by_department = HashMap::new();
        for record in records {
            if record.department.trim().is_empty() {
                warn!("Skipping requirement record without a department name");
                continue;
            }
            by_department.insert(record.department.clone(), record);
        }
        Self { by_department }
    }

    /// Parse a JSON array of requirement records
    ///
    /// # Errors
    /// Returns an error if the JSON does not match the record schema
    pub fn from_json_str(json: &str) -> Result<Self, RequirementError> {
        let records: Vec<Requirement> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Load requirement records from a JSON file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RequirementError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RequirementError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// The compiled-in requirement table
    ///
    /// # Errors
    /// Returns an error if the bundled asset is invalid
    pub fn builtin() -> Result<Self, RequirementError> {
        Self::from_json_str(REQUIREMENT_DEFAULTS)
    }

    /// Install the process-wide store.
    ///
    /// Returns the installed store. If another thread won the race, its
    /// store is returned and `store` is dropped.
    pub fn init_global(store: Self) -> &'static Self {
        GLOBAL_STORE.get_or_init(|| store)
    }

    /// The process-wide store, if one was installed
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL_STORE.get()
    }

    /// Requirements for a department
    #[must_use]
    pub fn get(&self, department: &str) -> Option<&Requirement> {
        self.by_department.get(department)
    }

    /// Whether the department has requirements on file
    #[must_use]
    pub fn contains(&self, department: &str) -> bool {
        self.by_department.contains_key(department)
    }

    /// Department names, sorted
    #[must_use]
    pub fn departments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_department.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of departments
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_department.len()
    }

    /// Whether the store has no departments
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_department.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_skips_unnamed_records() {
        let store = RequirementStore::from_json_str(
            r#"[
                {"department": "Law", "department_required": 72, "graduation_credits": 136},
                {"department": "", "department_required": 10},
                {"department_required": 5}
            ]"#,
        )
        .expect("valid json");

        assert_eq!(store.len(), 1);
        assert!(store.contains("Law"));
        let law = store.get("Law").expect("law present");
        assert!((law.graduation_credits - 136.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = RequirementStore::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, RequirementError::Parse(_)));
    }

    #[test]
    fn test_departments_sorted() {
        let store = RequirementStore::from_records([
            Requirement { department: "Zoology".into(), ..Requirement::default() },
            Requirement { department: "Architecture".into(), ..Requirement::default() },
        ]);
        assert_eq!(store.departments(), vec!["Architecture", "Zoology"]);
    }

    #[test]
    fn test_builtin_store_loads() {
        let store = RequirementStore::builtin().expect("bundled requirements should parse");
        assert!(!store.is_empty());
        assert!(store.contains("Computer Science and Information Engineering"));
    }

    #[test]
    fn test_global_is_installed_once() {
        let first = RequirementStore::init_global(RequirementStore::from_records([Requirement {
            department: "Law".into(),
            ..Requirement::default()
        }]));
        let second = RequirementStore::init_global(RequirementStore::default());
        assert!(std::ptr::eq(first, second));
        assert!(RequirementStore::global().is_some());
    }
}
