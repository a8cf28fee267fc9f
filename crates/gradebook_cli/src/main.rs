//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `gradebook_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use gradebook_core::{class_average, Gradebook, MemoryStore};

fn main() {
    println!("gradebook_core version={}", gradebook_core::core_version());

    match Gradebook::load(MemoryStore::new()) {
        Ok(book) => {
            println!(
                "seeded students={} assignments={} grades={}",
                book.students().len(),
                book.assignments().len(),
                book.grades().len()
            );
            println!(
                "class_average={}",
                class_average(book.grades(), book.assignments())
            );
        }
        Err(err) => {
            eprintln!("failed to load gradebook: {err}");
            std::process::exit(1);
        }
    }
}
