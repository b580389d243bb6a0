//! Deficit report model

use super::{BucketKind, CategoryTree, CurrentCredits};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a deficit computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Requirements were found and compared
    Success,
    /// The department has no entry in the requirement store
    UnknownDepartment,
    /// No department was supplied and none could be inferred
    DepartmentNotDetermined,
}

/// Comparison for one requirement bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketDeficit {
    /// Credits the department requires
    pub required: f64,
    /// Credits earned so far
    pub earned: f64,
    /// Shortfall, floored at zero
    pub deficit: f64,
    /// Whether the deficit is zero
    pub satisfied: bool,
    /// "satisfied" or "still need N credits"
    pub status: String,
}

impl BucketDeficit {
    /// Compare earned credits against a quota
    #[must_use]
    pub fn new(required: f64, earned: f64) -> Self {
        let deficit = (required - earned).max(0.0);
        let satisfied = deficit <= 0.0;
        let status = if satisfied {
            "satisfied".to_string()
        } else {
            format!("still need {deficit} credits")
        };
        Self {
            required,
            earned,
            deficit,
            satisfied,
            status,
        }
    }
}

/// Aggregate totals of a deficit report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalSummary {
    /// Overall graduation credits required
    pub total_required: f64,
    /// All earned credits, including unrecognized ones
    pub total_earned: f64,
    /// Overall shortfall, floored at zero
    pub total_gap: f64,
    /// Sum of the per-bucket deficits
    pub bucket_deficit_sum: f64,
    /// True only when both the overall gap and every bucket deficit are zero
    pub graduation_eligible: bool,
}

/// Per-bucket deficits, totals and recommendations for one department
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeficitReport {
    /// Outcome status
    pub status: ReportStatus,
    /// Department the report was computed for
    pub department: Option<String>,
    /// Explanation for non-success statuses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// One entry per requirement bucket; empty unless `status` is success
    pub deficit_details: BTreeMap<BucketKind, BucketDeficit>,
    /// Totals; absent unless `status` is success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_summary: Option<TotalSummary>,
    /// Ordered action list
    pub recommendations: Vec<String>,
}

impl DeficitReport {
    /// Report for a department missing from the requirement store
    #[must_use]
    pub fn unknown_department(department: &str) -> Self {
        Self {
            status: ReportStatus::UnknownDepartment,
            department: Some(department.to_string()),
            message: Some(format!(
                "no credit requirements found for department: {department}"
            )),
            deficit_details: BTreeMap::new(),
            total_summary: None,
            recommendations: Vec::new(),
        }
    }

    /// Report for a transcript whose department could not be inferred
    #[must_use]
    pub fn department_not_determined() -> Self {
        Self {
            status: ReportStatus::DepartmentNotDetermined,
            department: None,
            message: Some(
                "could not infer the student's department; specify it manually".to_string(),
            ),
            deficit_details: BTreeMap::new(),
            total_summary: None,
            recommendations: Vec::new(),
        }
    }

    /// Whether the student meets every requirement
    #[must_use]
    pub fn is_graduation_eligible(&self) -> bool {
        self.total_summary
            .as_ref()
            .is_some_and(|summary| summary.graduation_eligible)
    }
}

/// Full result of analyzing one transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Categorized courses
    pub categorized_credits: CategoryTree,
    /// Earned credits per bucket
    pub current_credits_summary: CurrentCredits,
    /// Deficit comparison
    pub deficit_analysis: DeficitReport,
}
