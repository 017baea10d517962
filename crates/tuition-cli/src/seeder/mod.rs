//! Fake institute data for local development.
//!
//! Every generated row carries [`SEED_MARKER`] in its `notes` column, which is
//! what [`clear_all`] deletes by. Lookup rows are shared reference data and
//! are left in place.

mod lookups;
mod models;
mod people;
mod schedule;

pub use lookups::seed_lookups;
pub use models::{Lookups, SEED_MARKER, SeedConfig};
pub use people::{generate_students, generate_teachers, seed_students, seed_teachers};
pub use schedule::{generate_classes, generate_payments, seed_classes, seed_payments};

use chrono::Utc;
use sqlx::PgPool;
use std::time::Instant;

/// Seeds lookups, teachers, students, a class schedule and fee payments.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let total_start = Instant::now();
    let today = Utc::now().date_naive();

    println!("🌱 Starting database seeding...");
    println!(
        "   Students: {}, Teachers: {}, Schedule: {} days ahead x {} per day",
        config.students, config.teachers, config.days_ahead, config.classes_per_day
    );
    println!();

    let lookups = seed_lookups(db).await?;
    let teacher_ids = seed_teachers(db, config.teachers, &lookups).await?;
    let student_ids = seed_students(db, config.students, &lookups, today).await?;

    let classes = generate_classes(
        &lookups,
        &teacher_ids,
        today,
        config.days_ahead,
        config.classes_per_day,
    );
    seed_classes(db, &classes).await?;

    let payments = generate_payments(&student_ids, config.payments_per_student, today);
    seed_payments(db, &payments).await?;

    println!();
    println!("✅ Seeding completed in {:?}", total_start.elapsed());
    Ok(())
}

/// Deletes every row written by [`seed_all`]. Returns the number of rows removed.
pub async fn clear_all(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    println!("🧹 Clearing seeded data...");

    let mut tx = db.begin().await?;
    let mut removed = 0;
    // Children first; fee_payments and classes reference students and teachers.
    for table in ["fee_payments", "classes", "students", "teachers"] {
        let rows = sqlx::query(&format!("DELETE FROM {table} WHERE notes = $1"))
            .bind(SEED_MARKER)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        println!("   ✓ {table}: {rows} rows");
        removed += rows;
    }
    tx.commit().await?;

    println!("✅ Cleared {} seeded rows", removed);
    Ok(removed)
}
