//! Standards, batches, subjects and fee plans.
//!
//! Names are unique, so re-running the seeder reuses existing rows.

use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

use super::models::Lookups;

pub const STANDARDS: [&str; 5] = ["8th", "9th", "10th", "11th", "12th"];
pub const SUBJECTS: [&str; 6] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "English",
    "Computer Science",
];
pub const BATCH_SLOTS: [&str; 2] = ["Morning", "Evening"];
/// `(name, amount, duration_months)`
pub const FEES_PLANS: [(&str, f64, i32); 3] = [
    ("Quarterly", 12000.0, 3),
    ("Half-yearly", 22000.0, 6),
    ("Annual", 40000.0, 12),
];

pub async fn seed_lookups(db: &PgPool) -> Result<Lookups, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📚 Seeding standards, batches, subjects and fee plans...");

    let mut tx = db.begin().await?;
    let mut lookups = Lookups::default();

    for standard in STANDARDS {
        let standard_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO standards (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(standard)
        .fetch_one(&mut *tx)
        .await?;

        for slot in BATCH_SLOTS {
            let name = format!("{} {}", standard, slot);
            let existing = sqlx::query_scalar::<_, Uuid>(
                "SELECT id FROM batches WHERE name = $1 AND standard_id = $2",
            )
            .bind(&name)
            .bind(standard_id)
            .fetch_optional(&mut *tx)
            .await?;

            let batch_id = match existing {
                Some(id) => id,
                None => {
                    sqlx::query_scalar::<_, Uuid>(
                        "INSERT INTO batches (name, standard_id) VALUES ($1, $2) RETURNING id",
                    )
                    .bind(&name)
                    .bind(standard_id)
                    .fetch_one(&mut *tx)
                    .await?
                }
            };
            lookups.batches.push((batch_id, standard_id));
        }
    }

    for subject in SUBJECTS {
        let subject_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO subjects (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(subject)
        .fetch_one(&mut *tx)
        .await?;
        lookups.subjects.push((subject_id, subject.to_string()));
    }

    for (name, amount, months) in FEES_PLANS {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM fees_plans WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?;

        let plan_id = match existing {
            Some(id) => id,
            None => {
                sqlx::query_scalar::<_, Uuid>(
                    "INSERT INTO fees_plans (name, amount, duration_months)
                     VALUES ($1, $2::numeric, $3)
                     RETURNING id",
                )
                .bind(name)
                .bind(amount)
                .bind(months)
                .fetch_one(&mut *tx)
                .await?
            }
        };
        lookups.fees_plans.push(plan_id);
    }

    tx.commit().await?;

    println!(
        "   ✓ {} batches, {} subjects, {} fee plans ready in {:?}",
        lookups.batches.len(),
        lookups.subjects.len(),
        lookups.fees_plans.len(),
        start_time.elapsed()
    );

    Ok(lookups)
}
