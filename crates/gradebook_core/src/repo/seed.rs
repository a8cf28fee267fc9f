//! Fixed sample dataset used when a collection is absent or corrupt.
//!
//! # Responsibility
//! - Provide a small, deterministic starting dataset so a first run (or a
//!   recovery from a corrupt blob) presents a working gradebook.
//!
//! # Invariants
//! - Ids and timestamps are fixed, so repeated seeding is reproducible.
//! - Every seed grade references a seed student and a seed assignment.

use crate::model::record::{Assignment, EntityId, Grade, Student};
use uuid::Uuid;

// Seed timestamps, epoch milliseconds (UTC).
const APR_1_2025: i64 = 1_743_465_600_000;
const MAY_15_2025: i64 = 1_747_267_200_000;
const JUN_10_2025: i64 = 1_749_513_600_000;
const JUL_20_2025: i64 = 1_752_969_600_000;

fn seed_id(namespace: u128, index: u128) -> EntityId {
    Uuid::from_u128((namespace << 64) | index)
}

fn student_id(index: u128) -> EntityId {
    seed_id(0x01, index)
}

fn assignment_id(index: u128) -> EntityId {
    seed_id(0x02, index)
}

fn grade_id(index: u128) -> EntityId {
    seed_id(0x03, index)
}

/// Sample students shown on first run.
pub fn sample_students() -> Vec<Student> {
    vec![
        Student::with_id(student_id(1), "Aisha Khan", "10th", APR_1_2025),
        Student::with_id(student_id(2), "Ben Ortiz", "10th", APR_1_2025),
        Student::with_id(student_id(3), "Chloe Park", "9th", APR_1_2025),
    ]
}

/// Sample assignments shown on first run.
pub fn sample_assignments() -> Vec<Assignment> {
    vec![
        Assignment::with_id(assignment_id(1), "Quiz 1", "Math", 20, APR_1_2025),
        Assignment::with_id(assignment_id(2), "Homework 1", "Math", 10, APR_1_2025),
        Assignment::with_id(assignment_id(3), "Midterm", "Science", 100, APR_1_2025),
    ]
}

/// Sample grades shown on first run.
pub fn sample_grades() -> Vec<Grade> {
    vec![
        Grade::with_id(grade_id(1), student_id(1), assignment_id(1), 18.0, MAY_15_2025),
        Grade::with_id(grade_id(2), student_id(1), assignment_id(2), 9.0, JUN_10_2025),
        Grade::with_id(grade_id(3), student_id(1), assignment_id(3), 88.0, JUL_20_2025),
        Grade::with_id(grade_id(4), student_id(2), assignment_id(1), 13.0, MAY_15_2025),
        Grade::with_id(grade_id(5), student_id(2), assignment_id(3), 71.0, JUL_20_2025),
        Grade::with_id(grade_id(6), student_id(3), assignment_id(2), 6.0, JUN_10_2025),
    ]
}
