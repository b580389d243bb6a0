//! Static classification tables
//!
//! A [`Taxonomy`] bundles everything classification and department
//! inference read but never modify: the prefix-to-category mapping, the
//! two general-education sub-track tables, the department prefix table,
//! and the bucket tag of every flat category. It is loaded once (from
//! the compiled-in `assets/taxonomy.toml` or a user file) and passed by
//! reference into every analysis.

use crate::core::error::TaxonomyError;
use crate::core::models::{BucketKind, CourseType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Compiled-in default taxonomy
const TAXONOMY_DEFAULTS: &str = include_str!("../../assets/taxonomy.toml");

/// Default name of the catch-all category
pub const DEFAULT_UNRECOGNIZED: &str = "Unrecognized";

/// Default name of the core general-education hierarchy
pub const DEFAULT_CORE_GE: &str = "Core General Education";

/// Default name of the liberal general-education hierarchy
pub const DEFAULT_LIBERAL_GE: &str = "Liberal General Education";

/// Default name of the implicit core general-education catch-all sub-track
pub const DEFAULT_CORE_OTHER: &str = "Other";

/// Code-prefix to category-name mapping resolved by longest match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMapping {
    /// (prefix, category) in declaration order
    entries: Vec<(String, String)>,
    /// Indices into `entries`, longest prefix first
    by_length: Vec<usize>,
}

impl CategoryMapping {
    /// Create an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from `(prefix, category)` pairs
    ///
    /// # Errors
    /// Returns an error if a prefix is empty or mapped to two categories
    pub fn from_pairs<I, P, C>(pairs: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let mut mapping = Self::new();
        for (prefix, category) in pairs {
            mapping.insert(prefix, category)?;
        }
        Ok(mapping)
    }

    /// Map a prefix to a category. Re-inserting the same pair is a no-op.
    ///
    /// # Errors
    /// Returns an error if the prefix is empty or already maps elsewhere
    pub fn insert(
        &mut self,
        prefix: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<(), TaxonomyError> {
        let prefix = prefix.into();
        let category = category.into();

        if prefix.is_empty() {
            return Err(TaxonomyError::EmptyPrefix { category });
        }
        if let Some((_, existing)) = self.entries.iter().find(|(p, _)| *p == prefix) {
            if *existing == category {
                return Ok(());
            }
            return Err(TaxonomyError::ConflictingPrefix {
                prefix,
                first: existing.clone(),
                second: category,
            });
        }

        self.entries.push((prefix, category));
        self.by_length = (0..self.entries.len()).collect();
        // Stable sort keeps declaration order among equal lengths.
        let entries = &self.entries;
        self.by_length
            .sort_by(|&a, &b| entries[b].0.len().cmp(&entries[a].0.len()));
        Ok(())
    }

    /// Category of the longest prefix of `course_id`, if any
    #[must_use]
    pub fn resolve(&self, course_id: &str) -> Option<&str> {
        self.by_length
            .iter()
            .map(|&i| &self.entries[i])
            .find(|(prefix, _)| course_id.starts_with(prefix.as_str()))
            .map(|(_, category)| category.as_str())
    }

    /// Distinct category names in first-declared order
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .map(|(_, category)| category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Number of prefixes
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no prefix is mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A core general-education sub-track identified by a code at a fixed offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreTrack {
    /// Sub-code found at the table offset (e.g., "A" in "CCA101")
    pub code: String,
    /// Sub-track name
    pub name: String,
}

/// Core general-education hierarchy definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreGeneralEducation {
    /// Category name
    pub name: String,
    /// Code prefixes that map to this category
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// Byte offset of the sub-code inside the course id
    #[serde(default = "default_core_offset")]
    pub offset: usize,
    /// Sub-track for ids without a recognizable sub-code
    #[serde(default = "default_core_other")]
    pub other: String,
    /// Declared sub-tracks
    #[serde(default)]
    pub tracks: Vec<CoreTrack>,
}

impl CoreGeneralEducation {
    /// Sub-track for a course id: the first declared code found at the
    /// offset, otherwise the catch-all sub-track.
    #[must_use]
    pub fn route(&self, course_id: &str) -> &str {
        self.tracks
            .iter()
            .find(|track| {
                course_id
                    .get(self.offset..self.offset + track.code.len())
                    .is_some_and(|code| code == track.code)
            })
            .map_or(self.other.as_str(), |track| track.name.as_str())
    }

    /// All sub-track names, the catch-all last
    pub fn subcategory_names(&self) -> impl Iterator<Item = &str> {
        self.tracks
            .iter()
            .map(|track| track.name.as_str())
            .chain(std::iter::once(self.other.as_str()))
    }
}

impl Default for CoreGeneralEducation {
    fn default() -> Self {
        Self {
            name: DEFAULT_CORE_GE.to_string(),
            prefixes: Vec::new(),
            offset: default_core_offset(),
            other: default_core_other(),
            tracks: Vec::new(),
        }
    }
}

const fn default_core_offset() -> usize {
    2
}

fn default_core_other() -> String {
    DEFAULT_CORE_OTHER.to_string()
}

/// A liberal general-education sub-track identified by an id prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiberalTrack {
    /// Prefix matched against the full course id
    pub prefix: String,
    /// Sub-track name
    pub name: String,
}

/// Liberal general-education hierarchy definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiberalGeneralEducation {
    /// Category name
    pub name: String,
    /// Code prefixes that map to this category
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// Declared sub-tracks
    #[serde(default)]
    pub tracks: Vec<LiberalTrack>,
}

impl LiberalGeneralEducation {
    /// Sub-track of the longest matching track prefix, if any
    #[must_use]
    pub fn route(&self, course_id: &str) -> Option<&str> {
        self.tracks
            .iter()
            .filter(|track| course_id.starts_with(track.prefix.as_str()))
            .max_by_key(|track| track.prefix.len())
            .map(|track| track.name.as_str())
    }

    /// All sub-track names
    pub fn subcategory_names(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|track| track.name.as_str())
    }
}

impl Default for LiberalGeneralEducation {
    fn default() -> Self {
        Self {
            name: DEFAULT_LIBERAL_GE.to_string(),
            prefixes: Vec::new(),
            tracks: Vec::new(),
        }
    }
}

/// Department code prefix used for inference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentPrefix {
    /// Code prefix, matched case-insensitively
    pub prefix: String,
    /// Department name as keyed in the requirement store
    pub name: String,
}

/// How a flat category's credits are bucketed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Department courses: required half to department-required, elective half to track-elective
    #[default]
    Department,
    /// Cross-department common requirements: both halves to institution-required
    Institution,
}

/// A flat category declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// Category name
    pub name: String,
    /// Bucket tag
    #[serde(default)]
    pub kind: CategoryKind,
    /// Code prefixes that map to this category
    pub prefixes: Vec<String>,
}

/// On-disk taxonomy layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TaxonomyDocument {
    #[serde(default = "default_unrecognized")]
    unrecognized: String,
    #[serde(default)]
    core_general_education: CoreGeneralEducation,
    #[serde(default)]
    liberal_general_education: LiberalGeneralEducation,
    #[serde(default)]
    categories: Vec<CategoryDef>,
    #[serde(default)]
    departments: Vec<DepartmentPrefix>,
}

fn default_unrecognized() -> String {
    DEFAULT_UNRECOGNIZED.to_string()
}

/// Read-only classification tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    /// Prefix to category mapping
    pub mapping: CategoryMapping,
    /// Name of the catch-all category
    pub unrecognized: String,
    /// Core general-education hierarchy
    pub core_ge: CoreGeneralEducation,
    /// Liberal general-education hierarchy
    pub liberal_ge: LiberalGeneralEducation,
    /// Flat categories tagged as institution requirements
    pub institution_categories: BTreeSet<String>,
    /// Department prefixes for inference
    pub departments: Vec<DepartmentPrefix>,
}

impl Taxonomy {
    /// Taxonomy with a mapping and default, empty hierarchies.
    ///
    /// Every mapped category is a department category.
    #[must_use]
    pub fn with_mapping(mapping: CategoryMapping) -> Self {
        Self {
            mapping,
            unrecognized: default_unrecognized(),
            core_ge: CoreGeneralEducation::default(),
            liberal_ge: LiberalGeneralEducation::default(),
            institution_categories: BTreeSet::new(),
            departments: Vec::new(),
        }
    }

    /// Parse a taxonomy from TOML
    ///
    /// # Errors
    /// Returns an error if the TOML is invalid or a prefix is empty or conflicting
    pub fn from_toml(toml_str: &str) -> Result<Self, TaxonomyError> {
        let doc: TaxonomyDocument = toml::from_str(toml_str)?;

        let mut mapping = CategoryMapping::new();
        for prefix in &doc.core_general_education.prefixes {
            mapping.insert(prefix.clone(), doc.core_general_education.name.clone())?;
        }
        for prefix in &doc.liberal_general_education.prefixes {
            mapping.insert(prefix.clone(), doc.liberal_general_education.name.clone())?;
        }

        let mut institution_categories = BTreeSet::new();
        for def in &doc.categories {
            for prefix in &def.prefixes {
                mapping.insert(prefix.clone(), def.name.clone())?;
            }
            if def.kind == CategoryKind::Institution {
                institution_categories.insert(def.name.clone());
            }
        }

        Ok(Self {
            mapping,
            unrecognized: doc.unrecognized,
            core_ge: doc.core_general_education,
            liberal_ge: doc.liberal_general_education,
            institution_categories,
            departments: doc.departments,
        })
    }

    /// Load a taxonomy from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// The compiled-in default taxonomy
    ///
    /// # Errors
    /// Returns an error if the bundled asset is invalid
    pub fn builtin() -> Result<Self, TaxonomyError> {
        Self::from_toml(TAXONOMY_DEFAULTS)
    }

    /// Tag a category as an institution requirement
    pub fn mark_institution(&mut self, category: impl Into<String>) {
        self.institution_categories.insert(category.into());
    }

    /// Whether `category` names one of the two hierarchies
    #[must_use]
    pub fn is_hierarchical(&self, category: &str) -> bool {
        category == self.core_ge.name || category == self.liberal_ge.name
    }

    /// Requirement bucket for one half of a flat category.
    ///
    /// Institution tag first, then the hierarchies, then the half's
    /// course type. The unrecognized category is split by type like any
    /// other flat category.
    #[must_use]
    pub fn bucket_for(&self, category: &str, course_type: CourseType) -> BucketKind {
        if self.institution_categories.contains(category) {
            BucketKind::InstitutionRequired
        } else if self.is_hierarchical(category) {
            BucketKind::GeneralEducation
        } else {
            match course_type {
                CourseType::Required => BucketKind::DepartmentRequired,
                CourseType::Elective => BucketKind::TrackElective,
            }
        }
    }

    /// Departments whose prefix matches `course_id`, case-insensitively
    pub fn departments_for<'a>(&'a self, course_id: &str) -> impl Iterator<Item = &'a str> {
        let id = course_id.to_lowercase();
        self.departments
            .iter()
            .filter(move |dept| id.starts_with(&dept.prefix.to_lowercase()))
            .map(|dept| dept.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_prefix_wins() {
        let mapping = CategoryMapping::from_pairs([
            ("CS", "Computer Science"),
            ("CS101", "Intro Series"),
            ("C", "Chemistry"),
        ])
        .expect("valid mapping");

        assert_eq!(mapping.resolve("CS101A"), Some("Intro Series"));
        assert_eq!(mapping.resolve("CS200"), Some("Computer Science"));
        assert_eq!(mapping.resolve("CH100"), Some("Chemistry"));
        assert_eq!(mapping.resolve("MA100"), None);
    }

    #[test]
    fn test_declaration_order_does_not_matter() {
        let forward =
            CategoryMapping::from_pairs([("CS", "A"), ("CS101", "B")]).expect("valid mapping");
        let backward =
            CategoryMapping::from_pairs([("CS101", "B"), ("CS", "A")]).expect("valid mapping");
        assert_eq!(forward.resolve("CS101A"), Some("B"));
        assert_eq!(backward.resolve("CS101A"), Some("B"));
    }

    #[test]
    fn test_categories_are_distinct() {
        let mapping = CategoryMapping::from_pairs([("CN", "Common"), ("EN", "Common"), ("CS", "CS")])
            .expect("valid mapping");
        assert_eq!(mapping.categories(), vec!["Common", "CS"]);
        assert_eq!(mapping.len(), 3);
    }

    #[test]
    fn test_conflicting_and_empty_prefixes_rejected() {
        let err = CategoryMapping::from_pairs([("CS", "A"), ("CS", "B")]).unwrap_err();
        assert!(matches!(err, TaxonomyError::ConflictingPrefix { .. }));

        let err = CategoryMapping::from_pairs([("", "A")]).unwrap_err();
        assert!(matches!(err, TaxonomyError::EmptyPrefix { .. }));

        assert!(CategoryMapping::from_pairs([("CS", "A"), ("CS", "A")]).is_ok());
    }

    #[test]
    fn test_core_route_uses_offset() {
        let core = CoreGeneralEducation {
            tracks: vec![
                CoreTrack { code: "A".into(), name: "Humanities".into() },
                CoreTrack { code: "B".into(), name: "Science".into() },
            ],
            ..CoreGeneralEducation::default()
        };
        assert_eq!(core.route("CCA101"), "Humanities");
        assert_eq!(core.route("CCB101"), "Science");
        assert_eq!(core.route("CCZ101"), "Other");
        assert_eq!(core.route("CC"), "Other");
        assert_eq!(core.route("ACC101"), "Other");
    }

    #[test]
    fn test_liberal_route_matches_full_id() {
        let liberal = LiberalGeneralEducation {
            tracks: vec![
                LiberalTrack { prefix: "LAH".into(), name: "Humanities".into() },
                LiberalTrack { prefix: "LAHX".into(), name: "Cross Humanities".into() },
            ],
            ..LiberalGeneralEducation::default()
        };
        assert_eq!(liberal.route("LAH101"), Some("Humanities"));
        assert_eq!(liberal.route("LAHX01"), Some("Cross Humanities"));
        assert_eq!(liberal.route("LAS101"), None);
    }

    #[test]
    fn test_bucket_tags() {
        let mapping =
            CategoryMapping::from_pairs([("CS", "Computer Science"), ("CN", "Common Series")])
                .expect("valid mapping");
        let mut taxonomy = Taxonomy::with_mapping(mapping);
        taxonomy.mark_institution("Common Series");

        assert_eq!(
            taxonomy.bucket_for("Computer Science", CourseType::Required),
            BucketKind::DepartmentRequired
        );
        assert_eq!(
            taxonomy.bucket_for("Computer Science", CourseType::Elective),
            BucketKind::TrackElective
        );
        assert_eq!(
            taxonomy.bucket_for("Common Series", CourseType::Elective),
            BucketKind::InstitutionRequired
        );
        assert_eq!(
            taxonomy.bucket_for(DEFAULT_UNRECOGNIZED, CourseType::Required),
            BucketKind::DepartmentRequired
        );
        assert_eq!(
            taxonomy.bucket_for(DEFAULT_UNRECOGNIZED, CourseType::Elective),
            BucketKind::TrackElective
        );
    }

    #[test]
    fn test_builtin_taxonomy_loads() {
        let taxonomy = Taxonomy::builtin().expect("bundled taxonomy should parse");
        assert!(!taxonomy.mapping.is_empty());
        assert!(!taxonomy.departments.is_empty());
        assert_eq!(
            taxonomy.mapping.resolve("CCA101"),
            Some(taxonomy.core_ge.name.as_str())
        );
        assert!(!taxonomy.institution_categories.is_empty());
    }

    #[test]
    fn test_departments_match_case_insensitively() {
        let mut taxonomy = Taxonomy::with_mapping(CategoryMapping::new());
        taxonomy.departments = vec![
            DepartmentPrefix { prefix: "da".into(), name: "Architecture".into() },
            DepartmentPrefix { prefix: "dap".into(), name: "Athletics".into() },
        ];
        let hits: Vec<&str> = taxonomy.departments_for("DAP101").collect();
        assert_eq!(hits, vec!["Architecture", "Athletics"]);
        assert_eq!(taxonomy.departments_for("CS101").count(), 0);
    }
}
