//! Data models for transcript analysis

pub mod category;
pub mod course;
pub mod report;
pub mod requirement;
pub mod semester;

pub use category::{
    BucketKind, CategoryNode, CategoryTree, CourseBucket, CreditTypeTotals, CurrentCredits,
    FlatCategory, HierarchicalCategory, SubCategory,
};
pub use course::{Course, CourseType, CreditOutcome, SkipReason};
pub use report::{AnalysisReport, BucketDeficit, DeficitReport, ReportStatus, TotalSummary};
pub use requirement::Requirement;
pub use semester::{all_courses, Semester};
