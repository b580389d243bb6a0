//! Recommendation generation from bucket deficits

use crate::core::models::{BucketDeficit, BucketKind};
use std::collections::BTreeMap;

/// Order in which unmet buckets are recommended
pub const PRIORITY: [BucketKind; 4] = [
    BucketKind::DepartmentRequired,
    BucketKind::InstitutionRequired,
    BucketKind::GeneralEducation,
    BucketKind::TrackElective,
];

/// Message when every bucket is satisfied
pub const ALL_SATISFIED: &str = "Congratulations! You meet all credit requirements.";

/// Turn deficits into an ordered action list.
///
/// One sentence per bucket with a nonzero deficit, in [`PRIORITY`]
/// order; a single congratulatory sentence when there are none.
#[must_use]
pub fn recommend(deficit_details: &BTreeMap<BucketKind, BucketDeficit>) -> Vec<String> {
    let mut recommendations: Vec<String> = PRIORITY
        .iter()
        .filter_map(|bucket| {
            let detail = deficit_details.get(bucket)?;
            (detail.deficit > 0.0).then(|| sentence(*bucket, detail.deficit))
        })
        .collect();

    if recommendations.is_empty() {
        recommendations.push(ALL_SATISFIED.to_string());
    }
    recommendations
}

fn sentence(bucket: BucketKind, deficit: f64) -> String {
    match bucket {
        BucketKind::DepartmentRequired => {
            format!("Prioritize department required courses; {deficit} credits still needed")
        }
        BucketKind::InstitutionRequired => format!(
            "Complete institution required courses (language, physical education, etc.) soon; {deficit} credits still needed"
        ),
        BucketKind::GeneralEducation => format!(
            "Take core or liberal general education courses; {deficit} credits still needed"
        ),
        BucketKind::TrackElective => {
            format!("Take department elective courses; {deficit} credits still needed")
        }
        BucketKind::Other => format!("{deficit} credits still needed"),
    }
}
