//! Classes and fee payments.

use chrono::{Days, NaiveDate, NaiveTime};
use fake::Fake;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

use tuition_models::{ClassType, PaymentMode};

use super::models::{ClassSeed, Lookups, PaymentSeed, SEED_MARKER};

/// Start hours of the day's slots; each class runs for one hour.
const SLOT_HOURS: [u32; 6] = [8, 10, 12, 15, 17, 19];
const PAST_DAYS: u64 = 7;

pub fn generate_classes(
    lookups: &Lookups,
    teacher_ids: &[Uuid],
    today: NaiveDate,
    days_ahead: u64,
    classes_per_day: usize,
) -> Vec<ClassSeed> {
    let first_day = today.checked_sub_days(Days::new(PAST_DAYS)).unwrap_or(today);
    let total_days = PAST_DAYS + days_ahead + 1;
    let per_day = classes_per_day.min(SLOT_HOURS.len());

    (0..total_days)
        .into_par_iter()
        .flat_map_iter(|offset| {
            let class_date = first_day
                .checked_add_days(Days::new(offset))
                .unwrap_or(first_day);
            (0..per_day).filter_map(move |slot| {
                let start_time = NaiveTime::from_hms_opt(SLOT_HOURS[slot], 0, 0)?;
                let end_time = NaiveTime::from_hms_opt(SLOT_HOURS[slot] + 1, 0, 0)?;
                let (batch_id, standard_id) = if lookups.batches.is_empty() {
                    (None, None)
                } else {
                    let (b, s) = lookups.batches[(0..lookups.batches.len()).fake::<usize>()];
                    (Some(b), Some(s))
                };
                let subject_id = if lookups.subjects.is_empty() {
                    None
                } else {
                    Some(lookups.subjects[(0..lookups.subjects.len()).fake::<usize>()].0)
                };
                let teacher_id = if teacher_ids.is_empty() {
                    None
                } else {
                    Some(teacher_ids[(0..teacher_ids.len()).fake::<usize>()])
                };

                Some(ClassSeed {
                    standard_id,
                    batch_id,
                    subject_id,
                    teacher_id,
                    class_date,
                    start_time,
                    end_time,
                    class_type: if (0..5).fake::<u8>() == 0 {
                        ClassType::Test
                    } else {
                        ClassType::Lecture
                    },
                })
            })
        })
        .collect()
}

pub fn generate_payments(
    student_ids: &[Uuid],
    payments_per_student: usize,
    today: NaiveDate,
) -> Vec<PaymentSeed> {
    const MODES: [PaymentMode; 4] = [
        PaymentMode::Cash,
        PaymentMode::Upi,
        PaymentMode::BankTransfer,
        PaymentMode::Card,
    ];

    student_ids
        .par_iter()
        .flat_map_iter(|&student_id| {
            (0..payments_per_student).map(move |_| PaymentSeed {
                student_id,
                amount_paid: (10..100).fake::<u32>() as f64 * 100.0,
                payment_mode: MODES[(0..MODES.len()).fake::<usize>()],
                payment_date: today
                    .checked_sub_days(Days::new((0..60).fake::<u64>()))
                    .unwrap_or(today),
            })
        })
        .collect()
}

pub async fn seed_classes(
    db: &PgPool,
    classes: &[ClassSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗓️  Seeding {} classes...", classes.len());

    let mut tx = db.begin().await?;
    let mut inserted = 0;
    for class in classes {
        inserted += sqlx::query(
            "INSERT INTO classes (standard_id, batch_id, subject_id, teacher_id, class_date, \
             start_time, end_time, class_type, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(class.standard_id)
        .bind(class.batch_id)
        .bind(class.subject_id)
        .bind(class.teacher_id)
        .bind(class.class_date)
        .bind(class.start_time)
        .bind(class.end_time)
        .bind(class.class_type)
        .bind(SEED_MARKER)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }
    tx.commit().await?;

    println!("   ✓ Inserted {} classes in {:?}", inserted, start_time.elapsed());
    Ok(inserted)
}

pub async fn seed_payments(
    db: &PgPool,
    payments: &[PaymentSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("💰 Seeding {} fee payments...", payments.len());

    let mut tx = db.begin().await?;
    let mut inserted = 0;
    for payment in payments {
        inserted += sqlx::query(
            "INSERT INTO fee_payments (student_id, amount_paid, payment_mode, payment_date, receipt_no, notes)
             VALUES ($1, $2::numeric, $3, $4, $5, $6)",
        )
        .bind(payment.student_id)
        .bind(payment.amount_paid)
        .bind(payment.payment_mode)
        .bind(payment.payment_date)
        .bind(format!("RCPT-{}", Uuid::new_v4().simple()))
        .bind(SEED_MARKER)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} payments in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}
