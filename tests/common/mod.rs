#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::{NaiveDate, NaiveTime};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use tuition_manager::router::init_router;
use tuition_manager::state::AppState;
use tuition_manager::tuition_config::EmailConfig;
use tuition_manager::tuition_core::hash_password;

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub fn test_state(pool: PgPool) -> AppState {
    dotenvy::dotenv().ok();
    let mut state = AppState::new(pool);
    state.email_config = EmailConfig::disabled();
    state
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

pub fn generate_unique_email() -> String {
    format!("staff-{}@institute.test", Uuid::new_v4())
}

/// Inserts an identity with a staff profile. `confirmed` controls whether
/// the email counts as verified.
pub async fn create_test_user(pool: &PgPool, password: &str, confirmed: bool) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO auth_users (email, password_hash, email_confirmed_at)
         VALUES ($1, $2, CASE WHEN $3 THEN NOW() ELSE NULL END)
         RETURNING id",
    )
    .bind(&email)
    .bind(&hashed)
    .bind(confirmed)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO user_profiles (user_id, full_name, role) VALUES ($1, 'Test Staff', 'Staff')")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();

    TestUser {
        id,
        email,
        password: password.to_string(),
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Signs in through the API and returns the access token.
pub async fn sign_in(app: &Router, user: &TestUser) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/sign-in",
            None,
            Some(serde_json::json!({ "email": user.email, "password": user.password })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    read_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn insert_student(pool: &PgPool, full_name: &str, pending_fees: Option<f64>) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO students (full_name, pending_fees) VALUES ($1, $2::numeric) RETURNING id",
    )
    .bind(full_name)
    .bind(pending_fees)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_teacher(pool: &PgPool, full_name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO teachers (full_name) VALUES ($1) RETURNING id")
        .bind(full_name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_subject(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO subjects (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_class(
    pool: &PgPool,
    class_date: NaiveDate,
    subject_id: Option<Uuid>,
    teacher_id: Option<Uuid>,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO classes (class_date, start_time, end_time, subject_id, teacher_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(class_date)
    .bind(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
    .bind(NaiveTime::from_hms_opt(11, 0, 0).unwrap())
    .bind(subject_id)
    .bind(teacher_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_fee_payment(
    pool: &PgPool,
    student_id: Uuid,
    amount: f64,
    payment_date: NaiveDate,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO fee_payments (student_id, amount_paid, payment_date)
         VALUES ($1, $2::numeric, $3)
         RETURNING id",
    )
    .bind(student_id)
    .bind(amount)
    .bind(payment_date)
    .fetch_one(pool)
    .await
    .unwrap()
}
