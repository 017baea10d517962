mod common;

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use tuition_manager::tuition_models::fees::{FEE_PAYMENT_COLUMNS, FEES_PLAN_COLUMNS};
use tuition_manager::tuition_models::students::STUDENT_COLUMNS;
use tuition_manager::tuition_models::teachers::TEACHER_COLUMNS;
use tuition_manager::tuition_models::{
    Batch, Class, ClassType, FeePayment, FeesPlan, GenderType, PaymentMode, Standard, Student,
    Subject, Teacher,
};

use common::{insert_class, insert_fee_payment, insert_student, insert_subject, insert_teacher};

#[sqlx::test(migrations = "./migrations")]
async fn test_student_ids_are_generated_in_sequence(pool: PgPool) {
    insert_student(&pool, "Priya Sharma", Some(1200.0)).await;
    insert_student(&pool, "Rohan Mehta", None).await;

    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {} FROM students ORDER BY student_id",
        STUDENT_COLUMNS
    ))
    .fetch_all(&pool)
    .await
    .unwrap();

    let ids: Vec<&str> = students.iter().map(|s| s.student_id.as_str()).collect();
    assert_eq!(ids, vec!["STU0001", "STU0002"]);
    assert_eq!(students[0].pending_fees, Some(1200.0));
    assert_eq!(students[0].fees_paid, Some(0.0));
    assert_eq!(students[1].pending_fees, None);
    assert!(students[0].joining_date.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_row_decodes_subjects_and_salary(pool: PgPool) {
    sqlx::query(
        "INSERT INTO teachers (full_name, subjects, salary, gender)
         VALUES ($1, $2, $3::numeric, $4)",
    )
    .bind("Kavita Iyer")
    .bind(vec!["Physics".to_string(), "Mathematics".to_string()])
    .bind(45000.0_f64)
    .bind(GenderType::Female)
    .execute(&pool)
    .await
    .unwrap();

    let teacher = sqlx::query_as::<_, Teacher>(&format!("SELECT {} FROM teachers", TEACHER_COLUMNS))
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(teacher.teacher_id, "TCH0001");
    assert_eq!(
        teacher.subjects,
        Some(vec!["Physics".to_string(), "Mathematics".to_string()])
    );
    assert_eq!(teacher.salary, Some(45000.0));
    assert_eq!(teacher.gender, Some(GenderType::Female));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_class_defaults_to_lecture_with_generated_id(pool: PgPool) {
    let subject = insert_subject(&pool, "Chemistry").await;
    let teacher = insert_teacher(&pool, "Arjun Nair").await;
    let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
    let id = insert_class(&pool, date, Some(subject), Some(teacher)).await;

    let class = sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(class.class_id, "CLS0001");
    assert_eq!(class.class_type, Some(ClassType::Lecture));
    assert_eq!(class.class_date, date);
    assert_eq!(class.subject_id, Some(subject));
    assert!(class.end_time > class.start_time);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_class_must_end_after_it_starts(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO classes (class_date, start_time, end_time) VALUES ($1, $2, $3)",
    )
    .bind(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
    .bind(NaiveTime::from_hms_opt(11, 0, 0).unwrap())
    .bind(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
    .execute(&pool)
    .await;

    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_fee_payment_defaults_and_positive_amount(pool: PgPool) {
    let student = insert_student(&pool, "Priya Sharma", Some(0.0)).await;
    let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let id = insert_fee_payment(&pool, student, 2500.0, date).await;

    let payment = sqlx::query_as::<_, FeePayment>(&format!(
        "SELECT {} FROM fee_payments WHERE id = $1",
        FEE_PAYMENT_COLUMNS
    ))
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(payment.amount_paid, 2500.0);
    assert_eq!(payment.payment_mode, Some(PaymentMode::Cash));
    assert_eq!(payment.payment_date, Some(date));
    assert_eq!(payment.student_id, Some(student));

    let zero = sqlx::query("INSERT INTO fee_payments (student_id, amount_paid) VALUES ($1, 0)")
        .bind(student)
        .execute(&pool)
        .await;
    assert!(zero.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_payment_mode_labels_round_trip_through_postgres(pool: PgPool) {
    let student = insert_student(&pool, "Rohan Mehta", None).await;
    sqlx::query(
        "INSERT INTO fee_payments (student_id, amount_paid, payment_mode) VALUES ($1, 100, $2)",
    )
    .bind(student)
    .bind(PaymentMode::BankTransfer)
    .execute(&pool)
    .await
    .unwrap();

    let label = sqlx::query_scalar::<_, String>("SELECT payment_mode::text FROM fee_payments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(label, "Bank Transfer");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lookup_rows(pool: PgPool) {
    let standard_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO standards (name) VALUES ('10th') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO batches (name, standard_id) VALUES ('Morning', $1)")
        .bind(standard_id)
        .execute(&pool)
        .await
        .unwrap();
    insert_subject(&pool, "Biology").await;
    sqlx::query("INSERT INTO fees_plans (name, amount) VALUES ('Annual', 36000)")
        .execute(&pool)
        .await
        .unwrap();

    let standard = sqlx::query_as::<_, Standard>("SELECT * FROM standards")
        .fetch_one(&pool)
        .await
        .unwrap();
    let batch = sqlx::query_as::<_, Batch>("SELECT * FROM batches")
        .fetch_one(&pool)
        .await
        .unwrap();
    let subject = sqlx::query_as::<_, Subject>("SELECT * FROM subjects")
        .fetch_one(&pool)
        .await
        .unwrap();
    let plan = sqlx::query_as::<_, FeesPlan>(&format!("SELECT {} FROM fees_plans", FEES_PLAN_COLUMNS))
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(standard.name, "10th");
    assert_eq!(batch.standard_id, Some(standard.id));
    assert_eq!(subject.name, "Biology");
    assert_eq!(plan.amount, 36000.0);
    assert_eq!(plan.duration_months, 12);

    let duplicate = sqlx::query("INSERT INTO standards (name) VALUES ('10th')")
        .execute(&pool)
        .await;
    assert!(duplicate.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_a_teacher_keeps_their_classes(pool: PgPool) {
    let teacher = insert_teacher(&pool, "Arjun Nair").await;
    let date = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
    let class_id = insert_class(&pool, date, None, Some(teacher)).await;

    sqlx::query("DELETE FROM teachers WHERE id = $1")
        .bind(teacher)
        .execute(&pool)
        .await
        .unwrap();

    let remaining = sqlx::query_scalar::<_, Option<Uuid>>("SELECT teacher_id FROM classes WHERE id = $1")
        .bind(class_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, None);
}
