use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::GenderType;

pub const TEACHER_COLUMNS: &str = "id, teacher_id, full_name, subjects, \
    salary::float8 AS salary, email, contact_number, address, dob, gender, \
    joining_date, notes, created_by, created_at, updated_at";

/// A faculty member. `teacher_id` is generated by `generate_teacher_id()`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    pub teacher_id: String,
    pub full_name: String,
    pub subjects: Option<Vec<String>>,
    pub salary: Option<f64>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<GenderType>,
    pub joining_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
