//! Read queries behind the dashboard statistics.

use std::future::Future;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use tuition_core::AppError;

/// The four independent reads the statistics are built from.
pub trait DashboardSource: Send + Sync {
    fn count_students(&self) -> impl Future<Output = Result<i64, AppError>> + Send;

    fn count_teachers(&self) -> impl Future<Output = Result<i64, AppError>> + Send;

    /// Classes whose date lies in `[from, to]`, both ends inclusive.
    fn count_classes_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<i64, AppError>> + Send;

    /// Outstanding fee amount of every student; `None` where unset.
    fn pending_fees(&self) -> impl Future<Output = Result<Vec<Option<f64>>, AppError>> + Send;
}

#[derive(Debug, Clone)]
pub struct PgDashboardSource {
    db: PgPool,
}

impl PgDashboardSource {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl DashboardSource for PgDashboardSource {
    #[instrument(skip(self))]
    async fn count_students(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn count_teachers(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn count_classes_between(&self, from: NaiveDate, to: NaiveDate) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM classes WHERE class_date >= $1 AND class_date <= $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.db)
        .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn pending_fees(&self) -> Result<Vec<Option<f64>>, AppError> {
        let fees = sqlx::query_scalar::<_, Option<f64>>("SELECT pending_fees::float8 FROM students")
            .fetch_all(&self.db)
            .await?;
        Ok(fees)
    }
}
