//! Deficit computation against department requirements

use crate::core::models::{BucketDeficit, BucketKind, CurrentCredits, DeficitReport, ReportStatus, TotalSummary};
use crate::core::recommend::recommend;
use crate::core::requirements::RequirementStore;
use crate::{debug, info};
use std::collections::BTreeMap;

/// Compare earned credits against a department's requirements.
///
/// An unknown department yields an `unknown_department` report with no
/// details rather than an error. Graduation eligibility requires both a
/// zero overall gap and zero deficit in every bucket, since surplus in
/// one bucket can hide a shortfall in another when only the total is
/// checked.
#[must_use]
pub fn compute_deficit(
    department: &str,
    current: &CurrentCredits,
    requirements: &RequirementStore,
) -> DeficitReport {
    let Some(requirement) = requirements.get(department) else {
        info!("No requirements on file for department '{department}'");
        return DeficitReport::unknown_department(department);
    };

    let deficit_details: BTreeMap<BucketKind, BucketDeficit> = BucketKind::REQUIREMENT_BUCKETS
        .iter()
        .map(|&bucket| {
            let detail = BucketDeficit::new(requirement.required(bucket), current.get(bucket));
            debug!(
                "{bucket}: required={} earned={} deficit={}",
                detail.required, detail.earned, detail.deficit
            );
            (bucket, detail)
        })
        .collect();

    let bucket_deficit_sum: f64 = deficit_details.values().map(|detail| detail.deficit).sum();
    let total_earned = current.total();
    let total_required = requirement.graduation_credits;
    let total_gap = (total_required - total_earned).max(0.0);
    let graduation_eligible = total_gap <= 0.0 && bucket_deficit_sum <= 0.0;

    let recommendations = recommend(&deficit_details);

    DeficitReport {
        status: ReportStatus::Success,
        department: Some(department.to_string()),
        message: None,
        deficit_details,
        total_summary: Some(TotalSummary {
            total_required,
            total_earned,
            total_gap,
            bucket_deficit_sum,
            graduation_eligible,
        }),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Requirement;

    fn store() -> RequirementStore {
        RequirementStore::from_records([Requirement {
            department: "Computer Science".into(),
            department_required: 50.0,
            track_elective: 20.0,
            institution_required: 28.0,
            general_education_elective: 16.0,
            graduation_credits: 128.0,
        }])
    }

    fn credits(dept: f64, track: f64, inst: f64, ge: f64, other: f64) -> CurrentCredits {
        CurrentCredits {
            department_required: dept,
            track_elective: track,
            institution_required: inst,
            general_education: ge,
            other,
        }
    }

    #[test]
    fn test_unknown_department() {
        let report = compute_deficit("Astrology", &CurrentCredits::default(), &store());
        assert_eq!(report.status, ReportStatus::UnknownDepartment);
        assert!(report.deficit_details.is_empty());
        assert!(report.total_summary.is_none());
    }

    #[test]
    fn test_all_satisfied() {
        let report = compute_deficit("Computer Science", &credits(50.0, 20.0, 28.0, 16.0, 14.0), &store());
        assert_eq!(report.status, ReportStatus::Success);
        assert!(report.deficit_details.values().all(|d| d.satisfied));
        let summary = report.total_summary.as_ref().expect("summary");
        assert!((summary.total_earned - 128.0).abs() < f64::EPSILON);
        assert!(summary.total_gap.abs() < f64::EPSILON);
        assert!(summary.graduation_eligible);
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn test_surplus_does_not_mask_bucket_deficit() {
        // 140 total credits, but general education is 6 short
        let report = compute_deficit("Computer Science", &credits(70.0, 26.0, 28.0, 10.0, 6.0), &store());
        let summary = report.total_summary.as_ref().expect("summary");
        assert!(summary.total_gap.abs() < f64::EPSILON);
        assert!((summary.bucket_deficit_sum - 6.0).abs() < f64::EPSILON);
        assert!(!summary.graduation_eligible);
        assert_eq!(
            report.deficit_details[&BucketKind::GeneralEducation].status,
            "still need 6 credits"
        );
    }

    #[test]
    fn test_other_counts_toward_total_only() {
        let report = compute_deficit("Computer Science", &credits(50.0, 20.0, 28.0, 16.0, 0.0), &store());
        let summary = report.total_summary.as_ref().expect("summary");
        assert!((summary.total_gap - 14.0).abs() < f64::EPSILON);
        assert!(summary.bucket_deficit_sum.abs() < f64::EPSILON);
        assert!(!summary.graduation_eligible);

        let report = compute_deficit("Computer Science", &credits(50.0, 20.0, 28.0, 16.0, 20.0), &store());
        assert!(report.is_graduation_eligible());
    }

    #[test]
    fn test_deficit_never_negative() {
        let report = compute_deficit("Computer Science", &credits(500.0, 0.0, 0.0, 0.0, 0.0), &store());
        assert!(report.deficit_details.values().all(|d| d.deficit >= 0.0));
        assert!(report.deficit_details[&BucketKind::DepartmentRequired].deficit.abs() < f64::EPSILON);
        assert_eq!(report.deficit_details.len(), 4);
        assert!(!report.deficit_details.contains_key(&BucketKind::Other));
    }
}
