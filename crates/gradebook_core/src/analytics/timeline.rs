//! Calendar-month activity series for trend charts.
//!
//! # Responsibility
//! - Bucket grade timestamps into trailing calendar months.
//!
//! # Invariants
//! - The series always holds exactly the requested number of buckets,
//!   including the current month; quiet months appear with zero counts,
//!   never omitted.

use super::performance::grade_percentage;
use crate::model::record::{Assignment, Grade};
use chrono::{DateTime, Datelike, TimeZone, Utc};

/// One calendar-month bucket of grading activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    /// `"YYYY-MM"` label in UTC.
    pub label: String,
    /// Grades recorded in this month.
    pub grade_count: usize,
    /// Mean percentage of this month's grades, rounded; 0 when empty.
    pub average_percent: u32,
}

/// Buckets grades into the trailing `months` calendar months ending at
/// `now_ms`, oldest bucket first.
pub fn monthly_activity(
    grades: &[Grade],
    assignments: &[Assignment],
    now_ms: i64,
    months: u32,
) -> Vec<MonthBucket> {
    if months == 0 {
        return Vec::new();
    }

    let current = month_index(now_ms);
    let oldest = current - i64::from(months) + 1;

    let mut counts = vec![0usize; months as usize];
    let mut sums = vec![0.0f64; months as usize];
    for grade in grades {
        let index = month_index(grade.recorded_at_ms);
        if index < oldest || index > current {
            continue;
        }
        let slot = (index - oldest) as usize;
        counts[slot] += 1;
        sums[slot] += grade_percentage(grade, assignments);
    }

    (0..months as usize)
        .map(|slot| {
            let average_percent = if counts[slot] == 0 {
                0
            } else {
                (sums[slot] / counts[slot] as f64).round().clamp(0.0, 100.0) as u32
            };
            MonthBucket {
                label: month_label(oldest + slot as i64),
                grade_count: counts[slot],
                average_percent,
            }
        })
        .collect()
}

/// Months since year 0 for the UTC month containing `epoch_ms`.
/// Out-of-range timestamps clamp to the Unix epoch month.
fn month_index(epoch_ms: i64) -> i64 {
    let at = Utc
        .timestamp_millis_opt(epoch_ms)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    i64::from(at.year()) * 12 + i64::from(at.month0())
}

fn month_label(index: i64) -> String {
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) + 1;
    format!("{year:04}-{month:02}")
}
