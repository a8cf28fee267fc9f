//! CSV and JSON export of current (possibly filtered) collections.
//!
//! # Responsibility
//! - Serialize collection views into download-ready text documents.
//!
//! # Invariants
//! - CSV fields are always double-quoted, embedded quotes doubled, lines
//!   separated by `\n` with a trailing newline.
//! - The header row matches the dashboard display column names.

use crate::analytics::performance::{grade_percentage, student_average, PerformanceBand};
use crate::model::record::{Assignment, Grade, Student};
use chrono::NaiveDate;
use serde::Serialize;

/// Builds a CSV document from a header row and data rows.
pub fn csv_document(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    push_row(&mut out, headers.iter().map(|h| (*h).to_string()));
    for row in rows {
        push_row(&mut out, row.iter().cloned());
    }
    out
}

fn push_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let quoted: Vec<String> = fields.map(|field| quote_field(&field)).collect();
    out.push_str(&quoted.join(","));
    out.push('\n');
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// CSV of a student slice with derived average and performance columns.
pub fn students_csv(
    students: &[Student],
    grades: &[Grade],
    assignments: &[Assignment],
) -> String {
    let rows: Vec<Vec<String>> = students
        .iter()
        .map(|student| {
            let average = student_average(student.id, grades, assignments);
            vec![
                student.name.clone(),
                student.grade_level.clone(),
                average.to_string(),
                PerformanceBand::for_average(average).label().to_string(),
            ]
        })
        .collect();
    csv_document(&["Name", "Grade Level", "Average %", "Performance"], &rows)
}

/// CSV of a grade slice with resolved student and assignment names.
/// A dangling reference renders as `"unknown"`.
pub fn grades_csv(
    grades: &[Grade],
    students: &[Student],
    assignments: &[Assignment],
) -> String {
    let rows: Vec<Vec<String>> = grades
        .iter()
        .map(|grade| {
            let student_name = students
                .iter()
                .find(|student| student.id == grade.student_id)
                .map_or("unknown", |student| student.name.as_str());
            let assignment_title = assignments
                .iter()
                .find(|assignment| assignment.id == grade.assignment_id)
                .map_or("unknown", |assignment| assignment.title.as_str());
            let out_of = assignments
                .iter()
                .find(|assignment| assignment.id == grade.assignment_id)
                .map_or(0, |assignment| assignment.total_marks);
            vec![
                student_name.to_string(),
                assignment_title.to_string(),
                format_score(grade.score),
                out_of.to_string(),
                (grade_percentage(grade, assignments).round() as i64).to_string(),
            ]
        })
        .collect();
    csv_document(
        &["Student", "Assignment", "Score", "Out Of", "Percent"],
        &rows,
    )
}

/// Pretty JSON document of any serializable slice.
pub fn json_document<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(items)
}

/// Deterministic download filename: `<domain>_<iso-date>.csv`.
pub fn export_filename(domain: &str, date: NaiveDate) -> String {
    format!("{domain}_{}.csv", date.format("%Y-%m-%d"))
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score}")
    }
}
