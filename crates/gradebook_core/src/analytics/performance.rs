//! Percentages, averages, performance bands and score trend.
//!
//! # Responsibility
//! - Convert raw scores into display metrics.
//!
//! # Invariants
//! - Each grade's percentage uses its own assignment's `total_marks` as
//!   denominator, so averages weight every assignment equally regardless
//!   of point value.
//! - A student with no grades has an average of exactly 0.

use crate::model::record::{Assignment, EntityId, Grade, Student};

/// Percentage for one grade against its referenced assignment.
///
/// A dangling `assignment_id` or a zero denominator yields `0.0`.
pub fn grade_percentage(grade: &Grade, assignments: &[Assignment]) -> f64 {
    let Some(assignment) = assignments
        .iter()
        .find(|assignment| assignment.id == grade.assignment_id)
    else {
        return 0.0;
    };
    if assignment.total_marks == 0 {
        return 0.0;
    }
    (grade.score / f64::from(assignment.total_marks)) * 100.0
}

/// Mean of a student's per-grade percentages, rounded to the nearest
/// integer. No grades means exactly 0.
pub fn student_average(
    student_id: EntityId,
    grades: &[Grade],
    assignments: &[Assignment],
) -> u32 {
    let percentages: Vec<f64> = grades
        .iter()
        .filter(|grade| grade.student_id == student_id)
        .map(|grade| grade_percentage(grade, assignments))
        .collect();
    if percentages.is_empty() {
        return 0;
    }

    let mean = percentages.iter().sum::<f64>() / percentages.len() as f64;
    mean.round().clamp(0.0, 100.0) as u32
}

/// Mean percentage across all grades, rounded. Empty input means 0.
pub fn class_average(grades: &[Grade], assignments: &[Assignment]) -> u32 {
    if grades.is_empty() {
        return 0;
    }
    let sum: f64 = grades
        .iter()
        .map(|grade| grade_percentage(grade, assignments))
        .sum();
    (sum / grades.len() as f64).round().clamp(0.0, 100.0) as u32
}

/// Named bucket for a continuous average metric.
///
/// Variants are declared worst-to-best so the derived ordering matches
/// metric ordering: `band(v1) <= band(v2)` whenever `v1 <= v2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PerformanceBand {
    NeedsImprovement,
    Average,
    Good,
    Excellent,
}

impl PerformanceBand {
    /// Buckets an average via inclusive lower bounds, checked highest-first
    /// so a value on a threshold takes the higher band.
    pub fn for_average(average: u32) -> Self {
        if average >= 90 {
            Self::Excellent
        } else if average >= 80 {
            Self::Good
        } else if average >= 70 {
            Self::Average
        } else {
            Self::NeedsImprovement
        }
    }

    /// Display label matching the dashboard column values.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }

    /// All bands, best first, for fixed-order chart legends.
    pub fn all() -> [Self; 4] {
        [
            Self::Excellent,
            Self::Good,
            Self::Average,
            Self::NeedsImprovement,
        ]
    }
}

/// Count of students per band, keyed by each student's average.
/// Returned best-band-first with zero counts preserved.
pub fn band_distribution(
    students: &[Student],
    grades: &[Grade],
    assignments: &[Assignment],
) -> Vec<(PerformanceBand, usize)> {
    PerformanceBand::all()
        .into_iter()
        .map(|band| {
            let count = students
                .iter()
                .filter(|student| {
                    PerformanceBand::for_average(student_average(
                        student.id,
                        grades,
                        assignments,
                    )) == band
                })
                .count();
            (band, count)
        })
        .collect()
}

/// Direction of a student's scores over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Declining,
    Steady,
}

/// Compares only the first and last chronological percentage for the
/// student; intermediate values are ignored. This mirrors the shipped
/// dashboards' behavior and is a product decision to revisit, not a
/// statistical choice.
pub fn score_trend(
    student_id: EntityId,
    grades: &[Grade],
    assignments: &[Assignment],
) -> Trend {
    let mut own: Vec<&Grade> = grades
        .iter()
        .filter(|grade| grade.student_id == student_id)
        .collect();
    if own.len() < 2 {
        return Trend::Steady;
    }
    own.sort_by_key(|grade| grade.recorded_at_ms);

    let first = grade_percentage(own[0], assignments);
    let last = grade_percentage(own[own.len() - 1], assignments);
    if last > first {
        Trend::Improving
    } else if last < first {
        Trend::Declining
    } else {
        Trend::Steady
    }
}
