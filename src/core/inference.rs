//! Department inference from course-code evidence

use crate::core::models::{CategoryNode, CategoryTree, Course, CourseType};
use crate::core::taxonomy::Taxonomy;
use crate::debug;
use std::collections::BTreeMap;

/// Weight of a required-course hit relative to an elective hit
pub const REQUIRED_WEIGHT: usize = 3;

/// Evidence counts for one department
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepartmentScore {
    /// Hits from required courses inside a required category half
    pub required: usize,
    /// All other hits
    pub elective: usize,
}

impl DepartmentScore {
    /// Weighted score used to rank departments
    #[must_use]
    pub const fn weighted(&self) -> usize {
        self.required * REQUIRED_WEIGHT + self.elective
    }
}

/// Count department prefix hits across every course in the tree.
///
/// A hit counts as required only when the course sits in the required
/// half of a flat category and its own type is required. Courses in the
/// general-education hierarchies always count as elective. A course id
/// matching several department prefixes scores for each of them.
#[must_use]
pub fn department_scores(
    categories: &CategoryTree,
    taxonomy: &Taxonomy,
) -> BTreeMap<String, DepartmentScore> {
    let mut scores: BTreeMap<String, DepartmentScore> = BTreeMap::new();

    let mut tally = |course: &Course, in_required_category: bool| {
        let required = in_required_category && course.kind() == CourseType::Required;
        for department in taxonomy.departments_for(&course.id) {
            let score = scores.entry(department.to_string()).or_default();
            if required {
                score.required += 1;
            } else {
                score.elective += 1;
            }
        }
    };

    for node in categories.values() {
        match node {
            CategoryNode::Flat(flat) => {
                let in_required = flat.course_type == CourseType::Required;
                for course in &flat.contents.courses {
                    tally(course, in_required);
                }
            }
            CategoryNode::Hierarchical(tree) => {
                for course in tree.all_courses() {
                    tally(course, false);
                }
            }
        }
    }

    scores
}

/// Infer the student's department from classified courses.
///
/// Returns the department with the highest weighted score. Ties go to
/// the lexicographically smallest department name. Returns `None` when
/// no course matched any department prefix.
#[must_use]
pub fn infer_department(categories: &CategoryTree, taxonomy: &Taxonomy) -> Option<String> {
    let scores = department_scores(categories, taxonomy);

    let mut best: Option<(&String, usize)> = None;
    for (department, score) in &scores {
        let weighted = score.weighted();
        debug!(
            "Department evidence: {department} required={} elective={} score={weighted}",
            score.required, score.elective
        );
        if best.map_or(true, |(_, best_score)| weighted > best_score) {
            best = Some((department, weighted));
        }
    }

    best.map(|(department, _)| department.clone())
}
