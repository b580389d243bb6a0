//! End-to-end transcript analysis
//!
//! Semesters -> classification -> department (given or inferred) ->
//! deficit report with recommendations.

use crate::core::classifier::{classify, Classification};
use crate::core::deficit::compute_deficit;
use crate::core::inference::infer_department;
use crate::core::models::{all_courses, AnalysisReport, Course, DeficitReport, Semester};
use crate::core::requirements::RequirementStore;
use crate::core::taxonomy::Taxonomy;
use crate::{info, warn};

/// Runs analyses against shared, read-only tables.
///
/// Holds only references, so one analyzer can serve many independent
/// transcripts, including from several threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    taxonomy: &'a Taxonomy,
    requirements: &'a RequirementStore,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer over a taxonomy and a requirement store
    #[must_use]
    pub const fn new(taxonomy: &'a Taxonomy, requirements: &'a RequirementStore) -> Self {
        Self {
            taxonomy,
            requirements,
        }
    }

    /// Analyze a transcript given as semesters
    #[must_use]
    pub fn analyze(&self, semesters: &[Semester], department: Option<&str>) -> AnalysisReport {
        self.analyze_courses(&all_courses(semesters), department)
    }

    /// Analyze a flat course list.
    ///
    /// When `department` is `None` it is inferred from the classified
    /// courses; if that fails the report carries a
    /// `department_not_determined` status with the classification still
    /// attached.
    #[must_use]
    pub fn analyze_courses(&self, courses: &[Course], department: Option<&str>) -> AnalysisReport {
        let Classification {
            categories,
            current_credits,
        } = classify(courses, self.taxonomy);

        let department = match department {
            Some(name) => Some(name.to_string()),
            None => {
                let inferred = infer_department(&categories, self.taxonomy);
                match &inferred {
                    Some(name) => info!("Inferred department: {name}"),
                    None => warn!("Could not infer department from course codes"),
                }
                inferred
            }
        };

        let deficit_analysis = department.map_or_else(DeficitReport::department_not_determined, |name| {
            compute_deficit(&name, &current_credits, self.requirements)
        });

        AnalysisReport {
            categorized_credits: categories,
            current_credits_summary: current_credits,
            deficit_analysis,
        }
    }
}
