//! Graduation requirement record

use super::BucketKind;
use serde::{Deserialize, Serialize};

/// Credit quotas a department sets for graduation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Department name (the store key)
    #[serde(default)]
    pub department: String,
    /// Department required credits
    #[serde(default)]
    pub department_required: f64,
    /// Track elective credits
    #[serde(default)]
    pub track_elective: f64,
    /// Institution required credits
    #[serde(default)]
    pub institution_required: f64,
    /// General education credits
    #[serde(default)]
    pub general_education_elective: f64,
    /// Overall graduation credits
    #[serde(default)]
    pub graduation_credits: f64,
}

impl Requirement {
    /// Quota for a bucket; `Other` never carries one
    #[must_use]
    pub const fn required(&self, bucket: BucketKind) -> f64 {
        match bucket {
            BucketKind::DepartmentRequired => self.department_required,
            BucketKind::TrackElective => self.track_elective,
            BucketKind::InstitutionRequired => self.institution_required,
            BucketKind::GeneralEducation => self.general_education_elective,
            BucketKind::Other => 0.0,
        }
    }
}
