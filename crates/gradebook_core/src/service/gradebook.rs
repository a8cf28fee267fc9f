//! Gradebook use-case service: CRUD handlers over the three collections.
//!
//! # Responsibility
//! - Own the in-memory collections and the store handle.
//! - Validate, apply and persist every user-initiated mutation.
//!
//! # Invariants
//! - Every successful mutation persists the affected collection(s) before
//!   returning (write-through, whole-array re-serialization).
//! - Deleting a student or assignment cascades to its grades.
//! - At most one grade exists per (student, assignment) pair.
//! - A failed validation leaves both memory and store untouched.

use crate::model::record::{
    Assignment, EntityId, Grade, RecordValidationError, Student,
};
use crate::repo::collection_repo::{
    load_collection, save_collection, LoadReport, RepoError, ASSIGNMENTS_KEY, GRADES_KEY,
    STUDENTS_KEY,
};
use crate::repo::seed;
use crate::service::preferences::Preferences;
use crate::store::Store;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for gradebook mutations.
#[derive(Debug)]
pub enum GradebookError {
    Validation(RecordValidationError),
    /// Score outside `[0, total_marks]` of the referenced assignment.
    ScoreOutOfRange { score: f64, total_marks: u32 },
    StudentNotFound(EntityId),
    AssignmentNotFound(EntityId),
    GradeNotFound(EntityId),
    Repo(RepoError),
}

impl Display for GradebookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ScoreOutOfRange { score, total_marks } => write!(
                f,
                "score {score} is outside the assignment's 0..={total_marks} range"
            ),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::AssignmentNotFound(id) => write!(f, "assignment not found: {id}"),
            Self::GradeNotFound(id) => write!(f, "grade not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GradebookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecordValidationError> for GradebookError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for GradebookError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Application root owning the collections and their persistence.
///
/// Constructed via [`Gradebook::load`], which runs the seed/load cycle for
/// all three collections plus preferences.
pub struct Gradebook<S: Store> {
    store: S,
    students: Vec<Student>,
    assignments: Vec<Assignment>,
    grades: Vec<Grade>,
    preferences: Preferences,
    load_report: LoadReport,
}

impl<S: Store> Gradebook<S> {
    /// Loads all collections from the store, seeding absent or corrupt keys.
    pub fn load(mut store: S) -> Result<Self, RepoError> {
        let (students, students_source) =
            load_collection(&mut store, STUDENTS_KEY, seed::sample_students)?;
        let (assignments, assignments_source) =
            load_collection(&mut store, ASSIGNMENTS_KEY, seed::sample_assignments)?;
        let (grades, grades_source) =
            load_collection(&mut store, GRADES_KEY, seed::sample_grades)?;
        let preferences = Preferences::load(&store)?;

        let load_report = LoadReport {
            students: students_source,
            assignments: assignments_source,
            grades: grades_source,
        };
        info!(
            "event=gradebook_load module=service status=ok students={} assignments={} grades={} corruption={}",
            students.len(),
            assignments.len(),
            grades.len(),
            load_report.had_corruption()
        );

        Ok(Self {
            store,
            students,
            assignments,
            grades,
            preferences,
            load_report,
        })
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Per-collection outcome of the initial load.
    pub fn load_report(&self) -> LoadReport {
        self.load_report
    }

    /// Consumes the gradebook and returns the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    // --- students ---

    /// Creates a student and persists the collection.
    pub fn add_student(
        &mut self,
        name: &str,
        grade_level: &str,
    ) -> Result<EntityId, GradebookError> {
        let student = Student::new(name, grade_level);
        student.validate()?;

        let id = student.id;
        self.students.push(student);
        self.persist_students()?;
        info!("event=student_add module=service status=ok id={id}");
        Ok(id)
    }

    /// Replaces an existing student's fields, preserving its id.
    pub fn update_student(&mut self, student: Student) -> Result<(), GradebookError> {
        student.validate()?;

        let slot = self
            .students
            .iter_mut()
            .find(|existing| existing.id == student.id)
            .ok_or(GradebookError::StudentNotFound(student.id))?;
        *slot = student;
        self.persist_students()?;
        Ok(())
    }

    /// Removes a student and cascades to their grades. Idempotent.
    pub fn delete_student(&mut self, id: EntityId) -> Result<(), GradebookError> {
        let students_before = self.students.len();
        self.students.retain(|student| student.id != id);

        let grades_before = self.grades.len();
        self.grades.retain(|grade| grade.student_id != id);

        let removed = self.students.len() != students_before;
        if removed {
            self.persist_students()?;
        }
        if self.grades.len() != grades_before {
            self.persist_grades()?;
        }
        if removed {
            info!(
                "event=student_delete module=service status=ok id={id} cascaded_grades={}",
                grades_before - self.grades.len()
            );
        }
        Ok(())
    }

    // --- assignments ---

    /// Creates an assignment and persists the collection.
    pub fn add_assignment(
        &mut self,
        title: &str,
        subject: &str,
        total_marks: u32,
    ) -> Result<EntityId, GradebookError> {
        let assignment = Assignment::new(title, subject, total_marks);
        assignment.validate()?;

        let id = assignment.id;
        self.assignments.push(assignment);
        self.persist_assignments()?;
        info!("event=assignment_add module=service status=ok id={id}");
        Ok(id)
    }

    /// Replaces an existing assignment's fields, preserving its id.
    pub fn update_assignment(&mut self, assignment: Assignment) -> Result<(), GradebookError> {
        assignment.validate()?;

        let slot = self
            .assignments
            .iter_mut()
            .find(|existing| existing.id == assignment.id)
            .ok_or(GradebookError::AssignmentNotFound(assignment.id))?;
        *slot = assignment;
        self.persist_assignments()?;
        Ok(())
    }

    /// Removes an assignment and cascades to its grades. Idempotent.
    pub fn delete_assignment(&mut self, id: EntityId) -> Result<(), GradebookError> {
        let assignments_before = self.assignments.len();
        self.assignments.retain(|assignment| assignment.id != id);

        let grades_before = self.grades.len();
        self.grades.retain(|grade| grade.assignment_id != id);

        let removed = self.assignments.len() != assignments_before;
        if removed {
            self.persist_assignments()?;
        }
        if self.grades.len() != grades_before {
            self.persist_grades()?;
        }
        if removed {
            info!(
                "event=assignment_delete module=service status=ok id={id} cascaded_grades={}",
                grades_before - self.grades.len()
            );
        }
        Ok(())
    }

    // --- grades ---

    /// Records a score for one (student, assignment) pair.
    ///
    /// # Contract
    /// - Upserts by the composite key: an existing grade for the pair is
    ///   updated in place, never duplicated.
    /// - The score bound is the referenced assignment's `total_marks`,
    ///   inclusive.
    /// - Unknown student or assignment ids are typed errors.
    pub fn record_grade(
        &mut self,
        student_id: EntityId,
        assignment_id: EntityId,
        score: f64,
    ) -> Result<EntityId, GradebookError> {
        if !self.students.iter().any(|student| student.id == student_id) {
            return Err(GradebookError::StudentNotFound(student_id));
        }
        let total_marks = self
            .assignments
            .iter()
            .find(|assignment| assignment.id == assignment_id)
            .map(|assignment| assignment.total_marks)
            .ok_or(GradebookError::AssignmentNotFound(assignment_id))?;
        check_score(score, total_marks)?;

        let existing = self.grades.iter_mut().find(|grade| {
            grade.student_id == student_id && grade.assignment_id == assignment_id
        });
        let (id, mode) = match existing {
            Some(grade) => {
                grade.score = score;
                grade.recorded_at_ms = crate::model::record::current_epoch_ms();
                (grade.id, "update")
            }
            None => {
                let grade = Grade::new(student_id, assignment_id, score);
                let id = grade.id;
                self.grades.push(grade);
                (id, "insert")
            }
        };

        self.persist_grades()?;
        info!("event=grade_record module=service status=ok mode={mode} id={id}");
        Ok(id)
    }

    /// Replaces an existing grade's fields, preserving its id.
    ///
    /// The replacement score is re-checked against the referenced
    /// assignment's bounds.
    pub fn update_grade(&mut self, grade: Grade) -> Result<(), GradebookError> {
        grade.validate()?;
        let total_marks = self
            .assignments
            .iter()
            .find(|assignment| assignment.id == grade.assignment_id)
            .map(|assignment| assignment.total_marks)
            .ok_or(GradebookError::AssignmentNotFound(grade.assignment_id))?;
        check_score(grade.score, total_marks)?;

        let slot = self
            .grades
            .iter_mut()
            .find(|existing| existing.id == grade.id)
            .ok_or(GradebookError::GradeNotFound(grade.id))?;
        *slot = grade;
        self.persist_grades()?;
        Ok(())
    }

    /// Removes a grade by id. Idempotent.
    pub fn delete_grade(&mut self, id: EntityId) -> Result<(), GradebookError> {
        let before = self.grades.len();
        self.grades.retain(|grade| grade.id != id);
        if self.grades.len() != before {
            self.persist_grades()?;
        }
        Ok(())
    }

    // --- preferences ---

    /// Sets and persists the dark-mode flag.
    pub fn set_dark_mode(&mut self, value: bool) -> Result<(), GradebookError> {
        Preferences::save_dark_mode(&mut self.store, value)?;
        self.preferences.dark_mode = value;
        Ok(())
    }

    /// Sets and persists the locale tag.
    pub fn set_locale(&mut self, value: &str) -> Result<(), GradebookError> {
        Preferences::save_locale(&mut self.store, value)?;
        self.preferences.locale = value.to_string();
        Ok(())
    }

    fn persist_students(&mut self) -> Result<(), RepoError> {
        save_collection(&mut self.store, STUDENTS_KEY, &self.students)
    }

    fn persist_assignments(&mut self) -> Result<(), RepoError> {
        save_collection(&mut self.store, ASSIGNMENTS_KEY, &self.assignments)
    }

    fn persist_grades(&mut self) -> Result<(), RepoError> {
        save_collection(&mut self.store, GRADES_KEY, &self.grades)
    }
}

fn check_score(score: f64, total_marks: u32) -> Result<(), GradebookError> {
    if !score.is_finite() || score < 0.0 {
        return Err(GradebookError::Validation(
            RecordValidationError::InvalidScore(score),
        ));
    }
    if score > f64::from(total_marks) {
        return Err(GradebookError::ScoreOutOfRange { score, total_marks });
    }
    Ok(())
}
