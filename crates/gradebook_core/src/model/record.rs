//! Entity records for students, assignments and grades.
//!
//! # Responsibility
//! - Define the persisted wire shape of each collection item.
//! - Provide constructors and field-level validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - Timestamps are Unix epoch milliseconds.
//! - `Grade.score` is validated against the referenced assignment's
//!   `total_marks` in the service layer, not here.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier shared by all collections.
pub type EntityId = Uuid;

/// Returns the current wall-clock time as epoch milliseconds.
pub fn current_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// Field-level validation error shared by all record types.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValidationError {
    /// A required string field is empty or whitespace-only.
    EmptyField {
        record: &'static str,
        field: &'static str,
    },
    /// An assignment must be worth at least one mark.
    NonPositiveTotalMarks,
    /// A score must be a finite, non-negative number.
    InvalidScore(f64),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { record, field } => {
                write!(f, "{record}.{field} must not be empty")
            }
            Self::NonPositiveTotalMarks => write!(f, "assignment total_marks must be positive"),
            Self::InvalidScore(score) => {
                write!(f, "score must be a finite non-negative number, got {score}")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// One student enrolled in the class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: EntityId,
    pub name: String,
    /// Display label such as `"10th"`.
    pub grade_level: String,
    pub created_at_ms: i64,
}

impl Student {
    /// Creates a student with a fresh id and the current timestamp.
    pub fn new(name: impl Into<String>, grade_level: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, grade_level, current_epoch_ms())
    }

    /// Creates a student with caller-provided identity, used by seed data
    /// and import paths where identity already exists.
    pub fn with_id(
        id: EntityId,
        name: impl Into<String>,
        grade_level: impl Into<String>,
        created_at_ms: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            grade_level: grade_level.into(),
            created_at_ms,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_non_empty("student", "name", &self.name)?;
        require_non_empty("student", "grade_level", &self.grade_level)?;
        Ok(())
    }
}

/// One graded assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: EntityId,
    pub title: String,
    pub subject: String,
    /// Denominator for every grade recorded against this assignment.
    pub total_marks: u32,
    pub created_at_ms: i64,
}

impl Assignment {
    /// Creates an assignment with a fresh id and the current timestamp.
    pub fn new(
        title: impl Into<String>,
        subject: impl Into<String>,
        total_marks: u32,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4(),
            title,
            subject,
            total_marks,
            current_epoch_ms(),
        )
    }

    pub fn with_id(
        id: EntityId,
        title: impl Into<String>,
        subject: impl Into<String>,
        total_marks: u32,
        created_at_ms: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            subject: subject.into(),
            total_marks,
            created_at_ms,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_non_empty("assignment", "title", &self.title)?;
        require_non_empty("assignment", "subject", &self.subject)?;
        if self.total_marks == 0 {
            return Err(RecordValidationError::NonPositiveTotalMarks);
        }
        Ok(())
    }
}

/// One recorded score, linking a student to an assignment.
///
/// The (student_id, assignment_id) pair is a composite key: the service
/// layer upserts by it, so at most one grade exists per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: EntityId,
    pub student_id: EntityId,
    pub assignment_id: EntityId,
    pub score: f64,
    pub recorded_at_ms: i64,
}

impl Grade {
    /// Creates a grade with a fresh id and the current timestamp.
    pub fn new(student_id: EntityId, assignment_id: EntityId, score: f64) -> Self {
        Self::with_id(
            Uuid::new_v4(),
            student_id,
            assignment_id,
            score,
            current_epoch_ms(),
        )
    }

    pub fn with_id(
        id: EntityId,
        student_id: EntityId,
        assignment_id: EntityId,
        score: f64,
        recorded_at_ms: i64,
    ) -> Self {
        Self {
            id,
            student_id,
            assignment_id,
            score,
            recorded_at_ms,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if !self.score.is_finite() || self.score < 0.0 {
            return Err(RecordValidationError::InvalidScore(self.score));
        }
        Ok(())
    }
}

fn require_non_empty(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::EmptyField { record, field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Assignment, Grade, RecordValidationError, Student};
    use uuid::Uuid;

    #[test]
    fn new_records_get_distinct_ids() {
        let a = Student::new("Alice", "10th");
        let b = Student::new("Alice", "10th");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn student_requires_name_and_grade_level() {
        let blank_name = Student::new("   ", "10th");
        assert!(matches!(
            blank_name.validate(),
            Err(RecordValidationError::EmptyField {
                record: "student",
                field: "name"
            })
        ));

        let blank_level = Student::new("Alice", "");
        assert!(matches!(
            blank_level.validate(),
            Err(RecordValidationError::EmptyField {
                record: "student",
                field: "grade_level"
            })
        ));

        assert!(Student::new("Alice", "10th").validate().is_ok());
    }

    #[test]
    fn assignment_rejects_zero_total_marks() {
        let assignment = Assignment::new("Quiz 1", "Math", 0);
        assert!(matches!(
            assignment.validate(),
            Err(RecordValidationError::NonPositiveTotalMarks)
        ));
    }

    #[test]
    fn grade_rejects_negative_and_non_finite_scores() {
        let negative = Grade::new(Uuid::new_v4(), Uuid::new_v4(), -1.0);
        assert!(matches!(
            negative.validate(),
            Err(RecordValidationError::InvalidScore(_))
        ));

        let nan = Grade::new(Uuid::new_v4(), Uuid::new_v4(), f64::NAN);
        assert!(nan.validate().is_err());

        let ok = Grade::new(Uuid::new_v4(), Uuid::new_v4(), 17.5);
        assert!(ok.validate().is_ok());
    }
}
