//! Dashboard payloads.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::enums::ClassType;

/// Point-in-time summary shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_teachers: i64,
    /// Classes dated between today and today + 7 days, inclusive.
    pub upcoming_classes: i64,
    /// Sum of every student's outstanding fees.
    pub pending_fees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A dismissable, user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStatsResponse {
    pub stats: DashboardStats,
    /// Present when the stats could not be loaded and zeros are shown.
    pub notification: Option<Notification>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct NextClass {
    pub class_id: String,
    pub class_date: NaiveDate,
    pub start_time: NaiveTime,
    pub class_type: Option<ClassType>,
    pub subject: Option<String>,
    pub standard: Option<String>,
    pub teacher: Option<String>,
}

/// The "This Week" panel.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeeklyOverview {
    pub classes_this_week: i64,
    /// Students enrolled during the last 7 days.
    pub new_students: i64,
    /// Fees received during the last 7 days.
    pub fee_collections: f64,
    pub next_class: Option<NextClass>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Student,
    Payment,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Success,
    Warning,
}

/// One entry of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
    pub status: Option<ActivityStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

impl ActivityQuery {
    /// Defaults to 10, clamped to 1..=50.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 50)
    }
}
