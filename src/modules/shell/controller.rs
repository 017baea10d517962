use axum::Json;
use axum::extract::Query;
use chrono::Utc;
use tracing::instrument;

use tuition_models::{ShellQuery, ShellView};

use super::navigation::build_shell_view;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;

/// Application shell: header, sidebar navigation and user footer
#[utoipa::path(
    get,
    path = "/api/shell",
    params(ShellQuery),
    responses(
        (status = 200, description = "Shell for the current path", body = ShellView),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Shell"
)]
#[instrument(skip(auth_user))]
pub async fn get_shell(auth_user: AuthUser, Query(query): Query<ShellQuery>) -> Json<ShellView> {
    Json(build_shell_view(
        auth_user.user(),
        &query,
        Utc::now().date_naive(),
    ))
}
