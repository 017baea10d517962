use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::GenderType;

/// Columns to select for [`Student`], with monetary values cast to float8.
pub const STUDENT_COLUMNS: &str = "id, student_id, full_name, standard_id, batch_id, \
    fees_plan_id, fees_paid::float8 AS fees_paid, pending_fees::float8 AS pending_fees, \
    email, contact_number, address, parent_name, dob, gender, joining_date, \
    profile_photo_url, notes, created_by, created_at, updated_at";

/// An enrolled student.
///
/// `student_id` is generated by the database (`generate_student_id()`).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub student_id: String,
    pub full_name: String,
    pub standard_id: Option<Uuid>,
    pub batch_id: Option<Uuid>,
    pub fees_plan_id: Option<Uuid>,
    pub fees_paid: Option<f64>,
    pub pending_fees: Option<f64>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub parent_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<GenderType>,
    pub joining_date: Option<NaiveDate>,
    pub profile_photo_url: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
