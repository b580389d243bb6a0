//! Course classification and credit accumulation
//!
//! Every course is routed to exactly one category by longest code-prefix
//! match. The two general-education categories are hierarchical and
//! route further into sub-tracks; all other categories are split into a
//! required half and an elective half. Courses are always listed, but
//! only passing courses add credits.

use crate::core::models::{
    all_courses, CategoryNode, CategoryTree, Course, CourseType, CreditOutcome, CurrentCredits,
    FlatCategory, HierarchicalCategory, Semester,
};
use crate::core::taxonomy::Taxonomy;
use crate::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of classifying one course list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Categories that received at least one course
    pub categories: CategoryTree,
    /// Earned credits reduced into the five named buckets
    pub current_credits: CurrentCredits,
}

impl Classification {
    /// Earned credits summed over every category in the tree
    #[must_use]
    pub fn total_earned(&self) -> f64 {
        self.categories.values().map(CategoryNode::earned_credits).sum()
    }

    /// Number of courses listed anywhere in the tree
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.categories
            .values()
            .map(|node| match node {
                CategoryNode::Flat(flat) => flat.contents.courses.len(),
                CategoryNode::Hierarchical(tree) => tree.all_courses().count(),
            })
            .sum()
    }
}

/// Classify a course list against a taxonomy.
///
/// Never fails: malformed numeric fields are logged and the course is
/// listed without credit.
#[must_use]
pub fn classify(courses: &[Course], taxonomy: &Taxonomy) -> Classification {
    let mut builder = TreeBuilder::new(taxonomy);
    for course in courses {
        builder.add(course.clone());
    }
    builder.finish()
}

/// Classify every course across all semesters
#[must_use]
pub fn classify_semesters(semesters: &[Semester], taxonomy: &Taxonomy) -> Classification {
    classify(&all_courses(semesters), taxonomy)
}

/// Reduce a category tree into the five named buckets
#[must_use]
pub fn current_credits(categories: &CategoryTree) -> CurrentCredits {
    categories
        .values()
        .fold(CurrentCredits::default(), |mut current, node| {
            current.add(node.bucket(), node.earned_credits());
            current
        })
}

#[derive(Debug, Default)]
struct RunStats {
    earned: usize,
    skipped: usize,
    malformed: usize,
    unrecognized: usize,
}

/// Single owned builder for one classification pass
struct TreeBuilder<'a> {
    taxonomy: &'a Taxonomy,
    flat: BTreeMap<String, FlatCategory>,
    core_ge: HierarchicalCategory,
    liberal_ge: HierarchicalCategory,
    stats: RunStats,
}

impl<'a> TreeBuilder<'a> {
    fn new(taxonomy: &'a Taxonomy) -> Self {
        let mut builder = Self {
            taxonomy,
            flat: BTreeMap::new(),
            core_ge: HierarchicalCategory::new(
                taxonomy.core_ge.name.clone(),
                taxonomy.core_ge.subcategory_names(),
            ),
            liberal_ge: HierarchicalCategory::new(
                taxonomy.liberal_ge.name.clone(),
                taxonomy.liberal_ge.subcategory_names(),
            ),
            stats: RunStats::default(),
        };

        for category in taxonomy.mapping.categories() {
            if !taxonomy.is_hierarchical(category) {
                builder.declare_flat(category);
            }
        }
        builder.declare_flat(&taxonomy.unrecognized);
        builder
    }

    fn declare_flat(&mut self, category: &str) {
        for course_type in [CourseType::Required, CourseType::Elective] {
            let bucket = self.taxonomy.bucket_for(category, course_type);
            let flat = FlatCategory::new(category, course_type, bucket);
            self.flat.entry(flat.key()).or_insert(flat);
        }
    }

    fn add(&mut self, course: Course) {
        let taxonomy = self.taxonomy;
        let category = match taxonomy.mapping.resolve(&course.id) {
            Some(category) => category,
            None => {
                self.stats.unrecognized += 1;
                taxonomy.unrecognized.as_str()
            }
        };

        let credits = self.credits_for(&course);
        let course_type = course.kind();

        if category == taxonomy.core_ge.name {
            let sub = taxonomy.core_ge.route(&course.id);
            debug!("{} -> {category} / {sub}", course.id);
            self.core_ge.record(Some(sub), course_type, course, credits);
        } else if category == taxonomy.liberal_ge.name {
            let sub = taxonomy.liberal_ge.route(&course.id);
            debug!("{} -> {category} / {}", course.id, sub.unwrap_or("(none)"));
            self.liberal_ge.record(sub, course_type, course, credits);
        } else {
            let key = FlatCategory::key_for(category, course_type);
            debug!("{} -> {key}", course.id);
            self.flat
                .entry(key)
                .or_insert_with(|| {
                    FlatCategory::new(
                        category,
                        course_type,
                        taxonomy.bucket_for(category, course_type),
                    )
                })
                .record(course, credits);
        }
    }

    fn credits_for(&mut self, course: &Course) -> f64 {
        let outcome = course.credit_outcome();
        match &outcome {
            CreditOutcome::Earned(_) => self.stats.earned += 1,
            CreditOutcome::Skipped(reason) => {
                debug!("{} earns no credit: {reason:?}", course.id);
                self.stats.skipped += 1;
            }
            CreditOutcome::Malformed { field, text } => {
                warn!(
                    "Course {} has malformed {field} '{text}'; listed without credit",
                    course.id
                );
                self.stats.malformed += 1;
            }
        }
        outcome.credits()
    }

    fn finish(self) -> Classification {
        let flats = self
            .flat
            .into_iter()
            .map(|(key, flat)| (key, CategoryNode::Flat(flat)));
        let trees = [self.core_ge, self.liberal_ge].into_iter().map(|mut tree| {
            tree.prune();
            (tree.name.clone(), CategoryNode::Hierarchical(tree))
        });
        let categories: CategoryTree = flats
            .chain(trees)
            .filter(|(_, node)| !node.is_empty())
            .collect();

        info!(
            "Classified {} courses into {} categories ({} earned, {} skipped, {} malformed, {} unrecognized)",
            self.stats.earned + self.stats.skipped + self.stats.malformed,
            categories.len(),
            self.stats.earned,
            self.stats.skipped,
            self.stats.malformed,
            self.stats.unrecognized
        );

        let current_credits = current_credits(&categories);
        Classification {
            categories,
            current_credits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::BucketKind;
    use crate::core::taxonomy::{CategoryMapping, CoreTrack, LiberalTrack};

    fn taxonomy() -> Taxonomy {
        let mapping = CategoryMapping::from_pairs([
            ("CS", "Computer Science"),
            ("CN", "Common Series"),
            ("CC", "Core General Education"),
            ("LG", "Liberal General Education"),
        ])
        .expect("valid mapping");
        let mut taxonomy = Taxonomy::with_mapping(mapping);
        taxonomy.mark_institution("Common Series");
        taxonomy.core_ge.tracks = vec![CoreTrack {
            code: "A".into(),
            name: "Humanities".into(),
        }];
        taxonomy.liberal_ge.tracks = vec![LiberalTrack {
            prefix: "LGH".into(),
            name: "Arts".into(),
        }];
        taxonomy
    }

    fn passed(id: &str, credits: &str, course_type: &str) -> Course {
        Course::new(id, "", credits, course_type, Some("80"))
    }

    fn flat<'a>(result: &'a Classification, key: &str) -> &'a FlatCategory {
        match result.categories.get(key) {
            Some(CategoryNode::Flat(flat)) => flat,
            other => panic!("expected flat category {key}, got {other:?}"),
        }
    }

    fn hierarchy<'a>(result: &'a Classification, key: &str) -> &'a HierarchicalCategory {
        match result.categories.get(key) {
            Some(CategoryNode::Hierarchical(tree)) => tree,
            other => panic!("expected hierarchy {key}, got {other:?}"),
        }
    }

    #[test]
    fn test_flat_routing_by_type() {
        let result = classify(
            &[
                passed("CS101", "3", "required"),
                passed("CS301", "2", "elective"),
                passed("CS302", "2", "seminar"),
            ],
            &taxonomy(),
        );

        assert!((flat(&result, "Computer Science - required").contents.earned_credits - 3.0).abs() < f64::EPSILON);
        let elective = flat(&result, "Computer Science - elective");
        assert_eq!(elective.contents.courses.len(), 2);
        assert_eq!(elective.bucket, BucketKind::TrackElective);
    }

    #[test]
    fn test_empty_categories_are_dropped() {
        let result = classify(&[passed("CS101", "3", "required")], &taxonomy());
        assert_eq!(
            result.categories.keys().collect::<Vec<_>>(),
            vec!["Computer Science - required"]
        );
    }

    #[test]
    fn test_unrecognized_halves_follow_course_type() {
        let result = classify(
            &[passed("ZZ999", "2", "required"), passed("ZZ998", "1", "elective")],
            &taxonomy(),
        );
        let required = flat(&result, "Unrecognized - required");
        let elective = flat(&result, "Unrecognized - elective");
        assert_eq!(required.bucket, BucketKind::DepartmentRequired);
        assert_eq!(elective.bucket, BucketKind::TrackElective);
        assert!((result.current_credits.department_required - 2.0).abs() < f64::EPSILON);
        assert!((result.current_credits.track_elective - 1.0).abs() < f64::EPSILON);
        assert!(result.current_credits.other.abs() < f64::EPSILON);
    }

    #[test]
    fn test_core_ge_routes_by_offset_and_other() {
        let result = classify(
            &[
                passed("CCA101", "2", "elective"),
                passed("CCQ101", "2", "required"),
            ],
            &taxonomy(),
        );
        let core = hierarchy(&result, "Core General Education");
        assert!((core.subcategories["Humanities"].elective.earned_credits - 2.0).abs() < f64::EPSILON);
        assert!((core.subcategories["Other"].required.earned_credits - 2.0).abs() < f64::EPSILON);
        assert!((core.earned_credits - 4.0).abs() < f64::EPSILON);
        assert!((result.current_credits.general_education - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_liberal_ge_without_track_lists_without_credit() {
        let result = classify(
            &[passed("LGH101", "2", "elective"), passed("LGX101", "3", "elective")],
            &taxonomy(),
        );
        let liberal = hierarchy(&result, "Liberal General Education");
        assert_eq!(liberal.courses.len(), 1);
        assert_eq!(liberal.courses[0].id, "LGX101");
        assert!((liberal.earned_credits - 2.0).abs() < f64::EPSILON);
        assert_eq!(result.course_count(), 2);
    }

    #[test]
    fn test_institution_tag_wins_over_type() {
        let result = classify(
            &[passed("CN101", "2", "required"), passed("CN102", "2", "elective")],
            &taxonomy(),
        );
        assert!((result.current_credits.institution_required - 4.0).abs() < f64::EPSILON);
        assert!(result.current_credits.department_required.abs() < f64::EPSILON);
        assert!(result.current_credits.track_elective.abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_and_failed_courses_are_listed() {
        let courses = [
            Course::new("CS101", "", "abc", "required", Some("90")),
            Course::new("CS102", "", "3", "required", Some("A+")),
            Course::new("CS103", "", "3", "required", Some("59")),
        ];
        let result = classify(&courses, &taxonomy());
        let required = flat(&result, "Computer Science - required");
        assert_eq!(required.contents.courses.len(), 3);
        assert!(required.contents.earned_credits.abs() < f64::EPSILON);
    }

    #[test]
    fn test_current_credits_matches_bucket_reduction() {
        let result = classify(
            &[
                passed("CS101", "3", "required"),
                passed("CN101", "2", "required"),
                passed("CCA101", "2", "elective"),
            ],
            &taxonomy(),
        );
        for node in result.categories.values() {
            assert!(result.current_credits.get(node.bucket()) >= node.earned_credits());
        }
        assert!((result.current_credits.department_required - 3.0).abs() < f64::EPSILON);
        assert!((result.current_credits.institution_required - 2.0).abs() < f64::EPSILON);
        assert!((result.current_credits.general_education - 2.0).abs() < f64::EPSILON);
        assert!((result.current_credits.total() - result.total_earned()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_semesters_are_flattened() {
        let mut fall = Semester::new("Fall");
        fall.add_course(passed("CS101", "3", "required"));
        let mut spring = Semester::new("Spring");
        spring.add_course(passed("CS102", "3", "required"));
        let result = classify_semesters(&[fall, spring], &taxonomy());
        assert!((result.current_credits.department_required - 6.0).abs() < f64::EPSILON);
        assert_eq!(
            flat(&result, "Computer Science - required").course_type,
            CourseType::Required
        );
    }
}
