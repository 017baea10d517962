//! Lookup tables used as foreign-key targets.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A grade level, e.g. "11th Science".
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Standard {
    pub id: Uuid,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A cohort of students grouped under a standard.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Batch {
    pub id: Uuid,
    pub name: String,
    pub standard_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}
