use gradebook_core::{
    band_distribution, class_average, monthly_activity, score_trend, student_average, Gradebook,
    MemoryStore, PerformanceBand, Trend,
};

fn empty_gradebook() -> Gradebook<MemoryStore> {
    let mut book = Gradebook::load(MemoryStore::new()).unwrap();
    for id in book.students().iter().map(|s| s.id).collect::<Vec<_>>() {
        book.delete_student(id).unwrap();
    }
    for id in book.assignments().iter().map(|a| a.id).collect::<Vec<_>>() {
        book.delete_assignment(id).unwrap();
    }
    book
}

#[test]
fn single_grade_average_matches_its_percentage() {
    // Spec reference scenario: Alice, Quiz 1 (100 marks), score 85.
    let mut book = empty_gradebook();
    let alice = book.add_student("Alice", "10th").unwrap();
    let quiz = book.add_assignment("Quiz 1", "Math", 100).unwrap();
    book.record_grade(alice, quiz, 85.0).unwrap();

    assert_eq!(
        student_average(alice, book.grades(), book.assignments()),
        85
    );
}

#[test]
fn averages_stay_within_bounds_for_any_graded_student() {
    let book = Gradebook::load(MemoryStore::new()).unwrap();
    for student in book.students() {
        let average = student_average(student.id, book.grades(), book.assignments());
        assert!(average <= 100);
    }
    assert!(class_average(book.grades(), book.assignments()) <= 100);
}

#[test]
fn seeded_band_distribution_covers_every_student() {
    let book = Gradebook::load(MemoryStore::new()).unwrap();
    let distribution =
        band_distribution(book.students(), book.grades(), book.assignments());

    assert_eq!(distribution.len(), 4);
    assert_eq!(distribution[0].0, PerformanceBand::Excellent);
    let total: usize = distribution.iter().map(|(_, count)| count).sum();
    assert_eq!(total, book.students().len());
}

#[test]
fn trend_follows_first_and_last_scores_through_mutations() {
    let mut book = empty_gradebook();
    let alice = book.add_student("Alice", "10th").unwrap();
    let quiz = book.add_assignment("Quiz 1", "Math", 20).unwrap();
    let homework = book.add_assignment("Homework 1", "Math", 10).unwrap();

    assert_eq!(
        score_trend(alice, book.grades(), book.assignments()),
        Trend::Steady
    );

    book.record_grade(alice, quiz, 10.0).unwrap(); // 50%
    book.record_grade(alice, homework, 9.0).unwrap(); // 90%
    assert_eq!(
        score_trend(alice, book.grades(), book.assignments()),
        Trend::Improving
    );
}

#[test]
fn monthly_series_from_live_gradebook_is_fully_populated() {
    let mut book = empty_gradebook();
    let alice = book.add_student("Alice", "10th").unwrap();
    let quiz = book.add_assignment("Quiz 1", "Math", 20).unwrap();
    book.record_grade(alice, quiz, 16.0).unwrap();

    let now_ms = book.grades()[0].recorded_at_ms;
    let series = monthly_activity(book.grades(), book.assignments(), now_ms, 6);

    assert_eq!(series.len(), 6);
    // Every requested month is present even when empty.
    assert!(series.iter().take(5).all(|bucket| bucket.grade_count == 0));
    let current = series.last().unwrap();
    assert_eq!(current.grade_count, 1);
    assert_eq!(current.average_percent, 80);
}

#[test]
fn deleting_a_parent_never_leaves_nan_in_derivations() {
    let mut book = empty_gradebook();
    let alice = book.add_student("Alice", "10th").unwrap();
    let quiz = book.add_assignment("Quiz 1", "Math", 100).unwrap();
    book.record_grade(alice, quiz, 85.0).unwrap();

    book.delete_assignment(quiz).unwrap();
    assert_eq!(
        student_average(alice, book.grades(), book.assignments()),
        0
    );
    assert_eq!(class_average(book.grades(), book.assignments()), 0);
}
