use gradebook_core::store::open_store;
use gradebook_core::{
    Gradebook, LoadSource, MemoryStore, Store, ASSIGNMENTS_KEY, GRADES_KEY, STUDENTS_KEY,
};

#[test]
fn first_run_seeds_all_collections_and_persists_them() {
    let book = Gradebook::load(MemoryStore::new()).unwrap();

    let report = book.load_report();
    assert_eq!(report.students, LoadSource::Seeded);
    assert_eq!(report.assignments, LoadSource::Seeded);
    assert_eq!(report.grades, LoadSource::Seeded);
    assert!(!report.had_corruption());

    assert!(!book.students().is_empty());
    assert!(!book.assignments().is_empty());
    assert!(!book.grades().is_empty());

    let store = book.into_store();
    for key in [STUDENTS_KEY, ASSIGNMENTS_KEY, GRADES_KEY] {
        assert!(store.get(key).unwrap().is_some());
    }
}

#[test]
fn second_load_reads_persisted_collections() {
    let book = Gradebook::load(MemoryStore::new()).unwrap();
    let students = book.students().to_vec();
    let store = book.into_store();

    let reloaded = Gradebook::load(store).unwrap();
    assert_eq!(reloaded.load_report().students, LoadSource::Persisted);
    assert_eq!(reloaded.students(), students.as_slice());
}

#[test]
fn corrupt_blob_recovers_with_seed_data_and_flags_the_report() {
    let mut store = MemoryStore::new();
    store.set(STUDENTS_KEY, "not json").unwrap();

    let book = Gradebook::load(store).unwrap();
    let report = book.load_report();
    assert_eq!(report.students, LoadSource::RecoveredFromCorrupt);
    assert!(report.had_corruption());
    assert!(!book.students().is_empty());

    // Recovery rewrote the blob, so the next load is clean.
    let reloaded = Gradebook::load(book.into_store()).unwrap();
    assert_eq!(reloaded.load_report().students, LoadSource::Persisted);
    assert!(!reloaded.load_report().had_corruption());
}

#[test]
fn shape_mismatch_counts_as_corruption() {
    let mut store = MemoryStore::new();
    // Valid JSON, wrong shape: an object instead of an array of records.
    store.set(GRADES_KEY, r#"{"score": 10}"#).unwrap();

    let book = Gradebook::load(store).unwrap();
    assert_eq!(
        book.load_report().grades,
        LoadSource::RecoveredFromCorrupt
    );
}

#[test]
fn sqlite_store_roundtrips_collections_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradebook.db");

    let store = open_store(&path).unwrap();
    let mut book = Gradebook::load(store).unwrap();
    let alice = book.add_student("Alice", "10th").unwrap();
    drop(book);

    let reopened = open_store(&path).unwrap();
    let book = Gradebook::load(reopened).unwrap();
    assert_eq!(book.load_report().students, LoadSource::Persisted);
    assert!(book.students().iter().any(|s| s.id == alice));
}
