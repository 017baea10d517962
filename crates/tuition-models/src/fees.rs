use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::PaymentMode;

pub const FEES_PLAN_COLUMNS: &str =
    "id, name, amount::float8 AS amount, duration_months, created_at";

pub const FEE_PAYMENT_COLUMNS: &str = "id, student_id, amount_paid::float8 AS amount_paid, \
    payment_mode, payment_date, receipt_no, notes, created_by, created_at";

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FeesPlan {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub duration_months: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// A single fee receipt against a student.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FeePayment {
    pub id: Uuid,
    pub student_id: Option<Uuid>,
    pub amount_paid: f64,
    pub payment_mode: Option<PaymentMode>,
    pub payment_date: Option<NaiveDate>,
    pub receipt_no: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}
