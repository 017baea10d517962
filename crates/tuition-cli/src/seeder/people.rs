//! Students and teachers.

use chrono::{Days, NaiveDate};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::CellNumber;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use tuition_models::GenderType;

use super::models::{Lookups, SEED_MARKER, StudentSeed, TeacherSeed};

fn pick<T: Copy>(items: &[T]) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[(0..items.len()).fake::<usize>()])
    }
}

fn random_gender() -> GenderType {
    match (0..10).fake::<u8>() {
        0..=4 => GenderType::Male,
        5..=8 => GenderType::Female,
        _ => GenderType::Other,
    }
}

pub fn generate_students(count: usize, lookups: &Lookups, today: NaiveDate) -> Vec<StudentSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let parent_first: String = FirstName().fake();
            let (batch_id, standard_id) = match pick(&lookups.batches) {
                Some((batch, standard)) => (Some(batch), Some(standard)),
                None => (None, None),
            };

            // Whole hundreds keep the dashboard totals readable.
            let fees_paid = (0..300).fake::<u32>() as f64 * 100.0;
            let pending_fees = if (0..3).fake::<u8>() == 0 {
                0.0
            } else {
                (10..150).fake::<u32>() as f64 * 100.0
            };

            StudentSeed {
                email: format!(
                    "{}.{}+student{}@example.com",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    idx
                ),
                full_name: format!("{} {}", first_name, last_name),
                standard_id,
                batch_id,
                fees_plan_id: pick(&lookups.fees_plans),
                fees_paid,
                pending_fees,
                contact_number: CellNumber().fake(),
                parent_name: format!("{} {}", parent_first, last_name),
                gender: random_gender(),
                joining_date: today
                    .checked_sub_days(Days::new((0..365).fake::<u64>()))
                    .unwrap_or(today),
            }
        })
        .collect()
}

pub fn generate_teachers(count: usize, lookups: &Lookups) -> Vec<TeacherSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let subjects: Vec<String> = (0..(1..3).fake::<usize>())
                .filter_map(|_| {
                    if lookups.subjects.is_empty() {
                        None
                    } else {
                        let i = (0..lookups.subjects.len()).fake::<usize>();
                        Some(lookups.subjects[i].1.clone())
                    }
                })
                .collect();

            TeacherSeed {
                email: format!(
                    "{}.{}+teacher{}@example.com",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    idx
                ),
                full_name: format!("{} {}", first_name, last_name),
                subjects,
                salary: (250..900).fake::<u32>() as f64 * 100.0,
                contact_number: CellNumber().fake(),
                gender: random_gender(),
            }
        })
        .collect()
}

pub async fn seed_students(
    db: &PgPool,
    count: usize,
    lookups: &Lookups,
    today: NaiveDate,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let students = generate_students(count, lookups, today);

    let mut tx = db.begin().await?;
    // 12 params per student
    const BATCH_SIZE: usize = 500;
    let mut ids = Vec::with_capacity(students.len());
    for chunk in students.chunks(BATCH_SIZE) {
        ids.extend(insert_students_chunk(&mut tx, chunk).await?);
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if students.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from(
        "INSERT INTO students (full_name, standard_id, batch_id, fees_plan_id, fees_paid, \
         pending_fees, email, contact_number, parent_name, gender, joining_date, notes) VALUES ",
    );
    for i in 0..students.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 12;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}::numeric, ${}::numeric, ${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6,
            p + 7,
            p + 8,
            p + 9,
            p + 10,
            p + 11,
            p + 12
        ));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar::<_, Uuid>(&query);
    for student in students {
        q = q
            .bind(&student.full_name)
            .bind(student.standard_id)
            .bind(student.batch_id)
            .bind(student.fees_plan_id)
            .bind(student.fees_paid)
            .bind(student.pending_fees)
            .bind(&student.email)
            .bind(&student.contact_number)
            .bind(&student.parent_name)
            .bind(student.gender)
            .bind(student.joining_date)
            .bind(SEED_MARKER);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

pub async fn seed_teachers(
    db: &PgPool,
    count: usize,
    lookups: &Lookups,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {} teachers...", count);

    let teachers = generate_teachers(count, lookups);

    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(teachers.len());
    for teacher in &teachers {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO teachers (full_name, subjects, salary, email, contact_number, gender, notes)
             VALUES ($1, $2, $3::numeric, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(&teacher.full_name)
        .bind(&teacher.subjects)
        .bind(teacher.salary)
        .bind(&teacher.email)
        .bind(&teacher.contact_number)
        .bind(teacher.gender)
        .bind(SEED_MARKER)
        .fetch_one(&mut *tx)
        .await?;
        ids.push(id);
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} teachers in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookups() -> Lookups {
        Lookups {
            batches: vec![(Uuid::new_v4(), Uuid::new_v4())],
            subjects: vec![(Uuid::new_v4(), "Physics".to_string())],
            fees_plans: vec![Uuid::new_v4()],
        }
    }

    #[test]
    fn test_generate_students_respects_count_and_constraints() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let students = generate_students(50, &lookups(), today);

        assert_eq!(students.len(), 50);
        for student in &students {
            assert!(student.pending_fees >= 0.0);
            assert!(student.fees_paid >= 0.0);
            assert!(student.joining_date <= today);
            assert!(student.batch_id.is_some());
        }
    }

    #[test]
    fn test_generate_teachers_uses_known_subjects() {
        let teachers = generate_teachers(10, &lookups());

        assert_eq!(teachers.len(), 10);
        for teacher in &teachers {
            assert!(!teacher.subjects.is_empty());
            assert!(teacher.subjects.iter().all(|s| s == "Physics"));
        }
    }

    #[test]
    fn test_generate_students_without_lookups() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let students = generate_students(3, &Lookups::default(), today);
        assert!(students.iter().all(|s| s.batch_id.is_none() && s.fees_plan_id.is_none()));
    }
}
