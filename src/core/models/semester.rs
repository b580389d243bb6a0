//! Semester model

use super::Course;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One semester block of a transcript
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    /// Semester label (e.g., "2023 Fall")
    #[serde(default)]
    pub semester_name: String,

    /// Courses in transcript order
    #[serde(default)]
    pub courses: Vec<Course>,

    /// Free-form summary fields (GPA, rank, ...)
    #[serde(default)]
    pub summary: BTreeMap<String, String>,
}

impl Semester {
    /// Create an empty semester
    #[must_use]
    pub fn new(semester_name: impl Into<String>) -> Self {
        Self {
            semester_name: semester_name.into(),
            ..Self::default()
        }
    }

    /// Add a course to the end of the semester
    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }
}

/// Flatten semesters into one course list; semester boundaries carry no weight.
#[must_use]
pub fn all_courses(semesters: &[Semester]) -> Vec<Course> {
    semesters
        .iter()
        .flat_map(|semester| semester.courses.iter().cloned())
        .collect()
}
