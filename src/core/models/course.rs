//! Course record model

use serde::{Deserialize, Deserializer, Serialize};

/// Course type text that marks a required course. Anything else is elective.
pub const REQUIRED_TYPE: &str = "required";

/// Remark markers that flag a withdrawn course
pub const WITHDRAWAL_MARKERS: &[&str] = &["withdrawn", "棄選"];

/// Lowest final score that earns credit
pub const PASSING_SCORE: f64 = 60.0;

/// Whether a course counts toward the required or elective half of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    /// Required course
    Required,
    /// Elective course (also the fallback for unrecognized type text)
    Elective,
}

impl CourseType {
    /// Parse transcript type text; unrecognized text is treated as elective
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case(REQUIRED_TYPE) || text == "必修" {
            Self::Required
        } else {
            Self::Elective
        }
    }

    /// Suffix used when building flat category keys
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Elective => "elective",
        }
    }
}

/// A single transcript line as produced by the transcript parser.
///
/// Numeric fields are kept as the raw text that was scraped; they are
/// validated when credits are accumulated, never at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code (e.g., "CS101A"), used for prefix matching
    pub id: String,

    /// Course title
    #[serde(default)]
    pub name: String,

    /// Credit text (e.g., "3")
    #[serde(default, deserialize_with = "text_or_number")]
    pub credits: String,

    /// Type text ("required", "elective", or anything else)
    #[serde(rename = "type", default)]
    pub course_type: String,

    /// Midterm score text, carried along but never used for credit math
    #[serde(default, deserialize_with = "optional_text_or_number", skip_serializing_if = "Option::is_none")]
    pub midterm_score: Option<String>,

    /// Final score text; `None` when the course has not been graded
    #[serde(default, deserialize_with = "optional_text_or_number")]
    pub final_score: Option<String>,

    /// Free-form remark (e.g., a withdrawal marker)
    #[serde(default)]
    pub remark: String,
}

/// Reason a course contributes no credit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Remark carries a withdrawal marker
    Withdrawn,
    /// Final score below [`PASSING_SCORE`]
    Failed,
    /// No final score recorded yet
    NotGraded,
}

/// Outcome of validating a course for credit accumulation
#[derive(Debug, Clone, PartialEq)]
pub enum CreditOutcome {
    /// The course passed and earns this many credits
    Earned(f64),
    /// The course is listed but earns nothing
    Skipped(SkipReason),
    /// A numeric field could not be parsed
    Malformed {
        /// Field name ("credits" or "final_score")
        field: &'static str,
        /// Offending text
        text: String,
    },
}

impl CreditOutcome {
    /// Credits contributed to accumulators (zero unless earned)
    #[must_use]
    pub const fn credits(&self) -> f64 {
        match self {
            Self::Earned(credits) => *credits,
            _ => 0.0,
        }
    }
}

impl Course {
    /// Create a course from its transcript fields
    ///
    /// # Arguments
    /// * `id` - Course code
    /// * `name` - Course title
    /// * `credits` - Credit text
    /// * `course_type` - Type text
    /// * `final_score` - Final score text, if graded
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        credits: impl Into<String>,
        course_type: impl Into<String>,
        final_score: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits: credits.into(),
            course_type: course_type.into(),
            midterm_score: None,
            final_score: final_score.map(str::to_string),
            remark: String::new(),
        }
    }

    /// Builder-style setter for the remark field
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = remark.into();
        self
    }

    /// Parsed course type
    #[must_use]
    pub fn kind(&self) -> CourseType {
        CourseType::from_text(&self.course_type)
    }

    /// Whether the remark marks this course as withdrawn
    #[must_use]
    pub fn is_withdrawn(&self) -> bool {
        let remark = self.remark.to_lowercase();
        WITHDRAWAL_MARKERS
            .iter()
            .any(|marker| remark.contains(marker))
    }

    /// Validate the course for credit accumulation.
    ///
    /// Withdrawal is checked first, then the final score, then the
    /// credit text. A malformed field never fails the caller; it is
    /// reported so it can be logged and the course earns nothing.
    #[must_use]
    pub fn credit_outcome(&self) -> CreditOutcome {
        if self.is_withdrawn() {
            return CreditOutcome::Skipped(SkipReason::Withdrawn);
        }

        let score_text = match self.final_score.as_deref().map(str::trim) {
            None | Some("") => return CreditOutcome::Skipped(SkipReason::NotGraded),
            Some(text) => text,
        };
        let Some(score) = parse_number(score_text) else {
            return CreditOutcome::Malformed {
                field: "final_score",
                text: score_text.to_string(),
            };
        };

        let Some(credits) = parse_number(self.credits.trim()) else {
            return CreditOutcome::Malformed {
                field: "credits",
                text: self.credits.clone(),
            };
        };

        if score >= PASSING_SCORE {
            CreditOutcome::Earned(credits)
        } else {
            CreditOutcome::Skipped(SkipReason::Failed)
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }
    }
}

// Scraped transcripts carry text; hand-written JSON often carries numbers.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TextOrNumber>::deserialize(deserializer).map(|value| value.map(String::from))
}
