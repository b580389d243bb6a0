//! Category tree produced by classification

use super::{Course, CourseType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Requirement bucket a category's credits roll up into.
///
/// Attached to every category when the tree is built, so aggregation
/// never inspects category names. Declaration order is the order the
/// four formal requirement buckets are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BucketKind {
    /// Required courses of the student's own department
    #[serde(rename = "department-required")]
    DepartmentRequired,
    /// Department electives
    #[serde(rename = "track-elective")]
    TrackElective,
    /// Cross-department common requirements
    #[serde(rename = "institution-required")]
    InstitutionRequired,
    /// Core and liberal general education
    #[serde(rename = "general-education-elective")]
    GeneralEducation,
    /// Credits outside the four quotas; count toward the total only
    #[serde(rename = "other")]
    Other,
}

impl BucketKind {
    /// The four buckets that carry a graduation quota
    pub const REQUIREMENT_BUCKETS: [Self; 4] = [
        Self::DepartmentRequired,
        Self::TrackElective,
        Self::InstitutionRequired,
        Self::GeneralEducation,
    ];

    /// Every bucket, `other` last
    pub const ALL: [Self; 5] = [
        Self::DepartmentRequired,
        Self::TrackElective,
        Self::InstitutionRequired,
        Self::GeneralEducation,
        Self::Other,
    ];

    /// Stable identifier used in reports
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::DepartmentRequired => "department-required",
            Self::TrackElective => "track-elective",
            Self::InstitutionRequired => "institution-required",
            Self::GeneralEducation => "general-education-elective",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DepartmentRequired => "department required",
            Self::TrackElective => "track elective",
            Self::InstitutionRequired => "institution required",
            Self::GeneralEducation => "general education elective",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for BucketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A course list with its earned-credit accumulator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CourseBucket {
    /// Every course routed here, passed or not
    pub courses: Vec<Course>,
    /// Credits from courses that passed
    pub earned_credits: f64,
}

impl CourseBucket {
    fn record(&mut self, course: Course, credits: f64) {
        self.courses.push(course);
        self.earned_credits += credits;
    }
}

/// Non-hierarchical half of a category, keyed `"<category> - required"` or `"<category> - elective"`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatCategory {
    /// Category name without the type suffix
    pub category: String,
    /// Which half this is
    pub course_type: CourseType,
    /// Bucket the earned credits roll up into
    pub bucket: BucketKind,
    /// Courses and credits
    #[serde(flatten)]
    pub contents: CourseBucket,
}

impl FlatCategory {
    /// Create an empty half-category
    #[must_use]
    pub fn new(category: impl Into<String>, course_type: CourseType, bucket: BucketKind) -> Self {
        Self {
            category: category.into(),
            course_type,
            bucket,
            contents: CourseBucket::default(),
        }
    }

    /// Tree key for a category half
    #[must_use]
    pub fn key_for(category: &str, course_type: CourseType) -> String {
        format!("{category} - {}", course_type.suffix())
    }

    /// Tree key of this half
    #[must_use]
    pub fn key(&self) -> String {
        Self::key_for(&self.category, self.course_type)
    }

    /// Add a course and the credits it earned
    pub fn record(&mut self, course: Course, credits: f64) {
        self.contents.record(course, credits);
    }
}

/// A named sub-track of a hierarchical category
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubCategory {
    /// Required courses
    pub required: CourseBucket,
    /// Elective courses
    pub elective: CourseBucket,
}

impl SubCategory {
    /// Earned credits across both halves
    #[must_use]
    pub fn earned_credits(&self) -> f64 {
        self.required.earned_credits + self.elective.earned_credits
    }

    /// Whether any course was routed here
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required.courses.is_empty() && self.elective.courses.is_empty()
    }

    fn bucket_mut(&mut self, course_type: CourseType) -> &mut CourseBucket {
        match course_type {
            CourseType::Required => &mut self.required,
            CourseType::Elective => &mut self.elective,
        }
    }
}

/// Earned credits split by course type
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CreditTypeTotals {
    /// Credits from required courses
    pub required: f64,
    /// Credits from elective courses
    pub elective: f64,
}

/// General-education category with named sub-tracks.
///
/// `earned_credits` always equals the sum of every sub-track's
/// `required` and `elective` earned credits; all mutation goes through
/// [`HierarchicalCategory::record`] to keep that true.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchicalCategory {
    /// Category name
    pub name: String,
    /// Bucket the earned credits roll up into
    pub bucket: BucketKind,
    /// Sub-tracks keyed by name
    pub subcategories: BTreeMap<String, SubCategory>,
    /// Courses that matched the category but no sub-track
    pub courses: Vec<Course>,
    /// Credits across all sub-tracks
    pub earned_credits: f64,
    /// Credits across all sub-tracks, split by course type
    pub total_credits: CreditTypeTotals,
}

impl HierarchicalCategory {
    /// Create a category with zeroed sub-tracks
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, subcategories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            bucket: BucketKind::GeneralEducation,
            subcategories: subcategories
                .into_iter()
                .map(|sub| (sub.into(), SubCategory::default()))
                .collect(),
            courses: Vec::new(),
            earned_credits: 0.0,
            total_credits: CreditTypeTotals::default(),
        }
    }

    /// Route a course into a sub-track.
    ///
    /// With `subcategory == None`, or a name the category does not
    /// declare, the course is listed on the parent only and its credits
    /// are not accumulated.
    pub fn record(
        &mut self,
        subcategory: Option<&str>,
        course_type: CourseType,
        course: Course,
        credits: f64,
    ) {
        let Some(sub) = subcategory.and_then(|name| self.subcategories.get_mut(name)) else {
            self.courses.push(course);
            return;
        };

        sub.bucket_mut(course_type).record(course, credits);
        self.earned_credits += credits;
        match course_type {
            CourseType::Required => self.total_credits.required += credits,
            CourseType::Elective => self.total_credits.elective += credits,
        }
    }

    /// Drop sub-tracks that received no courses
    pub fn prune(&mut self) {
        self.subcategories.retain(|_, sub| !sub.is_empty());
    }

    /// Whether no course was routed anywhere in this category
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.subcategories.values().all(SubCategory::is_empty)
    }

    /// Every course listed anywhere in the category
    pub fn all_courses(&self) -> impl Iterator<Item = &Course> {
        self.subcategories
            .values()
            .flat_map(|sub| sub.required.courses.iter().chain(sub.elective.courses.iter()))
            .chain(self.courses.iter())
    }
}

/// A node of the category tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CategoryNode {
    /// One half of a flat category
    Flat(FlatCategory),
    /// A general-education hierarchy
    Hierarchical(HierarchicalCategory),
}

impl CategoryNode {
    /// Requirement bucket of this node
    #[must_use]
    pub const fn bucket(&self) -> BucketKind {
        match self {
            Self::Flat(flat) => flat.bucket,
            Self::Hierarchical(tree) => tree.bucket,
        }
    }

    /// Earned credits of this node
    #[must_use]
    pub const fn earned_credits(&self) -> f64 {
        match self {
            Self::Flat(flat) => flat.contents.earned_credits,
            Self::Hierarchical(tree) => tree.earned_credits,
        }
    }

    /// Whether the node received no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(flat) => flat.contents.courses.is_empty(),
            Self::Hierarchical(tree) => tree.is_empty(),
        }
    }
}

/// Categorized courses keyed by category key, ordered for stable output
pub type CategoryTree = BTreeMap<String, CategoryNode>;

/// Earned credits reduced into the five named buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentCredits {
    /// Department required credits
    #[serde(rename = "department-required")]
    pub department_required: f64,
    /// Track elective credits
    #[serde(rename = "track-elective")]
    pub track_elective: f64,
    /// Institution required credits
    #[serde(rename = "institution-required")]
    pub institution_required: f64,
    /// General education credits
    #[serde(rename = "general-education-elective")]
    pub general_education: f64,
    /// Credits outside the four quotas
    pub other: f64,
}

impl CurrentCredits {
    /// Earned credits for one bucket
    #[must_use]
    pub const fn get(&self, bucket: BucketKind) -> f64 {
        match bucket {
            BucketKind::DepartmentRequired => self.department_required,
            BucketKind::TrackElective => self.track_elective,
            BucketKind::InstitutionRequired => self.institution_required,
            BucketKind::GeneralEducation => self.general_education,
            BucketKind::Other => self.other,
        }
    }

    /// Add credits to one bucket
    pub fn add(&mut self, bucket: BucketKind, credits: f64) {
        let slot = match bucket {
            BucketKind::DepartmentRequired => &mut self.department_required,
            BucketKind::TrackElective => &mut self.track_elective,
            BucketKind::InstitutionRequired => &mut self.institution_required,
            BucketKind::GeneralEducation => &mut self.general_education,
            BucketKind::Other => &mut self.other,
        };
        *slot += credits;
    }

    /// Sum of all five buckets, including `other`
    #[must_use]
    pub fn total(&self) -> f64 {
        self.department_required
            + self.track_elective
            + self.institution_required
            + self.general_education
            + self.other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str) -> Course {
        Course::new(id, "", "2", "elective", Some("80"))
    }

    #[test]
    fn test_flat_key() {
        let flat = FlatCategory::new("Computer Science", CourseType::Required, BucketKind::DepartmentRequired);
        assert_eq!(flat.key(), "Computer Science - required");
        assert_eq!(
            FlatCategory::key_for("Computer Science", CourseType::Elective),
            "Computer Science - elective"
        );
    }

    #[test]
    fn test_hierarchy_totals_follow_subcategories() {
        let mut ge = HierarchicalCategory::new("Core General Education", ["Humanities", "Science"]);
        ge.record(Some("Humanities"), CourseType::Required, course("CCA01"), 2.0);
        ge.record(Some("Science"), CourseType::Elective, course("CCB01"), 3.0);
        ge.record(Some("Science"), CourseType::Elective, course("CCB02"), 0.0);

        let sub_sum: f64 = ge.subcategories.values().map(SubCategory::earned_credits).sum();
        assert!((ge.earned_credits - 5.0).abs() < f64::EPSILON);
        assert!((ge.earned_credits - sub_sum).abs() < f64::EPSILON);
        assert!((ge.total_credits.required - 2.0).abs() < f64::EPSILON);
        assert!((ge.total_credits.elective - 3.0).abs() < f64::EPSILON);
        assert_eq!(ge.all_courses().count(), 3);
    }

    #[test]
    fn test_unrouted_course_lists_on_parent_only() {
        let mut ge = HierarchicalCategory::new("Liberal General Education", ["Arts"]);
        ge.record(None, CourseType::Elective, course("LGX01"), 2.0);
        ge.record(Some("Nope"), CourseType::Elective, course("LGX02"), 2.0);

        assert_eq!(ge.courses.len(), 2);
        assert!(ge.earned_credits.abs() < f64::EPSILON);
        assert!(!ge.is_empty());
    }

    #[test]
    fn test_prune_drops_empty_subcategories() {
        let mut ge = HierarchicalCategory::new("Core General Education", ["A", "B", "Other"]);
        assert!(ge.is_empty());
        ge.record(Some("B"), CourseType::Elective, course("CCB01"), 2.0);
        ge.prune();
        assert_eq!(ge.subcategories.keys().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn test_node_emptiness_covers_both_kinds() {
        let mut flat = FlatCategory::new("Law", CourseType::Required, BucketKind::DepartmentRequired);
        assert!(CategoryNode::Flat(flat.clone()).is_empty());
        flat.record(course("LA101"), 0.0);
        assert!(!CategoryNode::Flat(flat).is_empty());

        let mut ge = HierarchicalCategory::new("Liberal General Education", ["Arts"]);
        assert!(CategoryNode::Hierarchical(ge.clone()).is_empty());
        ge.record(None, CourseType::Elective, course("LGX01"), 2.0);
        assert!(!CategoryNode::Hierarchical(ge).is_empty());
    }

    #[test]
    fn test_current_credits_total_includes_other() {
        let mut current = CurrentCredits::default();
        current.add(BucketKind::DepartmentRequired, 10.0);
        current.add(BucketKind::Other, 4.0);
        assert!((current.get(BucketKind::Other) - 4.0).abs() < f64::EPSILON);
        assert!((current.total() - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bucket_keys_serialize() {
        let json = serde_json::to_string(&BucketKind::GeneralEducation).expect("serialize");
        assert_eq!(json, "\"general-education-elective\"");
        assert_eq!(BucketKind::TrackElective.to_string(), "track-elective");
    }
}
