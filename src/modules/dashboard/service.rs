use chrono::{DateTime, Days, Duration, NaiveDate, NaiveDateTime, Utc};
use sqlx::PgPool;
use tracing::{error, instrument};
use uuid::Uuid;

use tuition_core::AppError;
use tuition_models::{
    ActivityItem, ActivityStatus, ActivityType, DashboardStats, NextClass, Notification,
    WeeklyOverview,
};

use super::source::DashboardSource;
use crate::utils::format::format_rupees;

pub const UPCOMING_WINDOW_DAYS: u64 = 7;
pub const LOAD_FAILED_TITLE: &str = "Error loading dashboard";
pub const LOAD_FAILED_DESCRIPTION: &str = "Failed to load dashboard data. Please try again.";

/// Inclusive date range counted as "upcoming": today through today + 7.
pub fn upcoming_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = today
        .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);
    (today, end)
}

/// Sums pending fees, counting unset and non-finite amounts as zero.
pub fn sum_pending_fees(values: &[Option<f64>]) -> f64 {
    values
        .iter()
        .flatten()
        .filter(|amount| amount.is_finite())
        .sum()
}

/// Result of one statistics load.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLoad {
    pub stats: DashboardStats,
    pub notification: Option<Notification>,
}

impl DashboardLoad {
    pub fn failed() -> Self {
        Self {
            stats: DashboardStats::default(),
            notification: Some(Notification::destructive(
                LOAD_FAILED_TITLE,
                LOAD_FAILED_DESCRIPTION,
            )),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.notification.is_some()
    }
}

/// Runs the four statistics queries concurrently.
///
/// Every query runs to completion. If any of them fails the whole result
/// falls back to zeros with a destructive notification; partial statistics
/// are never returned.
#[instrument(skip(source))]
pub async fn aggregate_stats<S: DashboardSource>(source: &S, today: NaiveDate) -> DashboardLoad {
    let (from, to) = upcoming_window(today);

    let (students, teachers, classes, fees) = tokio::join!(
        source.count_students(),
        source.count_teachers(),
        source.count_classes_between(from, to),
        source.pending_fees(),
    );

    match (students, teachers, classes, fees) {
        (Ok(total_students), Ok(total_teachers), Ok(upcoming_classes), Ok(fees)) => {
            DashboardLoad {
                stats: DashboardStats {
                    total_students,
                    total_teachers,
                    upcoming_classes,
                    pending_fees: sum_pending_fees(&fees),
                },
                notification: None,
            }
        }
        (students, teachers, classes, fees) => {
            let failures = [
                ("students", students.err()),
                ("teachers", teachers.err()),
                ("classes", classes.err()),
                ("pending_fees", fees.err()),
            ];
            for (query, err) in failures {
                if let Some(err) = err {
                    error!(query, error = %err.message(), "dashboard query failed");
                }
            }
            DashboardLoad::failed()
        }
    }
}

#[derive(sqlx::FromRow)]
struct StudentActivityRow {
    id: Uuid,
    full_name: String,
    batch: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PaymentActivityRow {
    id: Uuid,
    student: Option<String>,
    amount_paid: f64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ClassActivityRow {
    id: Uuid,
    subject: Option<String>,
    standard: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OverdueActivityRow {
    id: Uuid,
    full_name: String,
    updated_at: DateTime<Utc>,
}

fn student_activity(row: StudentActivityRow) -> ActivityItem {
    let description = match row.batch {
        Some(batch) => format!("{} joined {} batch", row.full_name, batch),
        None => format!("{} enrolled", row.full_name),
    };
    ActivityItem {
        id: format!("student-{}", row.id),
        activity_type: ActivityType::Student,
        title: "New Student Enrolled".to_string(),
        description,
        occurred_at: row.created_at,
        status: Some(ActivityStatus::Success),
    }
}

fn payment_activity(row: PaymentActivityRow) -> ActivityItem {
    let student = row.student.unwrap_or_else(|| "A student".to_string());
    ActivityItem {
        id: format!("payment-{}", row.id),
        activity_type: ActivityType::Payment,
        title: "Fee Payment Received".to_string(),
        description: format!("{} paid {}", student, format_rupees(row.amount_paid)),
        occurred_at: row.created_at,
        status: Some(ActivityStatus::Success),
    }
}

fn class_activity(row: ClassActivityRow) -> ActivityItem {
    let description = match (row.subject, row.standard) {
        (Some(subject), Some(standard)) => format!("{} class for {}", subject, standard),
        (Some(subject), None) => format!("{} class", subject),
        (None, Some(standard)) => format!("Class for {}", standard),
        (None, None) => "New class added to the timetable".to_string(),
    };
    ActivityItem {
        id: format!("class-{}", row.id),
        activity_type: ActivityType::Class,
        title: "Class Scheduled".to_string(),
        description,
        occurred_at: row.created_at,
        status: None,
    }
}

fn overdue_activity(row: OverdueActivityRow) -> ActivityItem {
    ActivityItem {
        id: format!("overdue-{}", row.id),
        activity_type: ActivityType::Payment,
        title: "Payment Overdue".to_string(),
        description: format!("{} has pending fees", row.full_name),
        occurred_at: row.updated_at,
        status: Some(ActivityStatus::Warning),
    }
}

/// Newest first, at most `limit` items.
pub fn merge_activity(groups: Vec<Vec<ActivityItem>>, limit: usize) -> Vec<ActivityItem> {
    let mut items: Vec<ActivityItem> = groups.into_iter().flatten().collect();
    items.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    items.truncate(limit);
    items
}

pub struct DashboardService;

impl DashboardService {
    /// Figures for the "This Week" card.
    #[instrument(skip(db))]
    pub async fn weekly_overview(
        db: &PgPool,
        now: NaiveDateTime,
    ) -> Result<WeeklyOverview, AppError> {
        let today = now.date();
        let (from, to) = upcoming_window(today);
        let week_ago = today
            .checked_sub_days(Days::new(UPCOMING_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        let joined_since = now.and_utc() - Duration::days(UPCOMING_WINDOW_DAYS as i64);

        let classes = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM classes WHERE class_date >= $1 AND class_date <= $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(db);

        let new_students =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE created_at >= $1")
                .bind(joined_since)
                .fetch_one(db);

        let collections = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(amount_paid), 0)::float8 FROM fee_payments
             WHERE payment_date >= $1 AND payment_date <= $2",
        )
        .bind(week_ago)
        .bind(today)
        .fetch_one(db);

        // `start_time` is stored without a zone and compared against UTC wall time.
        let next_class = sqlx::query_as::<_, NextClass>(
            "SELECT c.class_id, c.class_date, c.start_time, c.class_type,
                    sub.name AS subject, st.name AS standard, t.full_name AS teacher
             FROM classes c
             LEFT JOIN subjects sub ON sub.id = c.subject_id
             LEFT JOIN standards st ON st.id = c.standard_id
             LEFT JOIN teachers t ON t.id = c.teacher_id
             WHERE c.class_date > $1 OR (c.class_date = $1 AND c.start_time >= $2)
             ORDER BY c.class_date, c.start_time
             LIMIT 1",
        )
        .bind(today)
        .bind(now.time())
        .fetch_optional(db);

        let (classes_this_week, new_students, fee_collections, next_class) =
            tokio::try_join!(classes, new_students, collections, next_class)?;

        Ok(WeeklyOverview {
            classes_this_week,
            new_students,
            fee_collections: if fee_collections.is_finite() {
                fee_collections
            } else {
                0.0
            },
            next_class,
        })
    }

    /// Recent enrolments, payments, scheduled classes and students with
    /// outstanding fees, newest first.
    #[instrument(skip(db))]
    pub async fn recent_activity(db: &PgPool, limit: i64) -> Result<Vec<ActivityItem>, AppError> {
        let students = sqlx::query_as::<_, StudentActivityRow>(
            "SELECT s.id, s.full_name, b.name AS batch, s.created_at
             FROM students s
             LEFT JOIN batches b ON b.id = s.batch_id
             WHERE s.created_at IS NOT NULL
             ORDER BY s.created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(db);

        let payments = sqlx::query_as::<_, PaymentActivityRow>(
            "SELECT p.id, s.full_name AS student, p.amount_paid::float8 AS amount_paid, p.created_at
             FROM fee_payments p
             LEFT JOIN students s ON s.id = p.student_id
             WHERE p.created_at IS NOT NULL
             ORDER BY p.created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(db);

        let classes = sqlx::query_as::<_, ClassActivityRow>(
            "SELECT c.id, sub.name AS subject, st.name AS standard, c.created_at
             FROM classes c
             LEFT JOIN subjects sub ON sub.id = c.subject_id
             LEFT JOIN standards st ON st.id = c.standard_id
             WHERE c.created_at IS NOT NULL
             ORDER BY c.created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(db);

        let overdue = sqlx::query_as::<_, OverdueActivityRow>(
            "SELECT id, full_name, updated_at
             FROM students
             WHERE pending_fees > 0 AND updated_at IS NOT NULL
             ORDER BY updated_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(db);

        let (students, payments, classes, overdue) =
            tokio::try_join!(students, payments, classes, overdue)?;

        Ok(merge_activity(
            vec![
                students.into_iter().map(student_activity).collect(),
                payments.into_iter().map(payment_activity).collect(),
                classes.into_iter().map(class_activity).collect(),
                overdue.into_iter().map(overdue_activity).collect(),
            ],
            usize::try_from(limit).unwrap_or(0),
        ))
    }
}
