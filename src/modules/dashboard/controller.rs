use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use tracing::instrument;

use tuition_core::AppError;
use tuition_models::{ActivityItem, ActivityQuery, DashboardStatsResponse, WeeklyOverview};

use super::service::DashboardService;
use super::source::PgDashboardSource;
use crate::metrics::track_dashboard_load;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// Load the dashboard statistics for the caller's session
///
/// Never fails once authenticated: if any query fails, every figure is zero
/// and `notification` describes the failure.
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStatsResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state, auth_user), fields(session_id = %auth_user.session_id()))]
pub async fn get_stats(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Json<DashboardStatsResponse> {
    let view = state
        .dashboard_views
        .view_for(auth_user.session_id(), auth_user.expires_at())
        .await;
    let source = PgDashboardSource::new(state.db.clone());

    let activation = view.activate(&source, Utc::now().date_naive()).await;
    track_dashboard_load(&activation);

    let displayed = activation.displayed;
    Json(DashboardStatsResponse {
        stats: displayed.load.stats,
        notification: displayed.load.notification,
        last_updated: displayed.loaded_at,
    })
}

/// Weekly overview: classes this week, new students, fee collections
#[utoipa::path(
    get,
    path = "/api/dashboard/overview",
    responses(
        (status = 200, description = "Weekly overview", body = WeeklyOverview),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_overview(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<WeeklyOverview>, AppError> {
    let overview = DashboardService::weekly_overview(&state.db, Utc::now().naive_utc()).await?;
    Ok(Json(overview))
}

/// Recent activity feed, newest first
#[utoipa::path(
    get,
    path = "/api/dashboard/activity",
    params(ActivityQuery),
    responses(
        (status = 200, description = "Recent activity", body = Vec<ActivityItem>),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_activity(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityItem>>, AppError> {
    let items = DashboardService::recent_activity(&state.db, query.limit()).await?;
    Ok(Json(items))
}
