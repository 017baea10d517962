//! Identities and their profiles.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::UserRole;

/// Application-level profile tied to an identity.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub role: Option<UserRole>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The signed-in user as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

impl SessionUser {
    /// Role shown in the sidebar; identities without a profile are staff.
    pub fn effective_role(&self) -> UserRole {
        self.role.unwrap_or_default()
    }
}
