use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::ClassType;

/// A scheduled lecture or test for one batch.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub class_id: String,
    pub batch_id: Option<Uuid>,
    pub standard_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub class_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub class_type: Option<ClassType>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
