use axum::{Router, routing::get};

use super::controller::{get_activity, get_overview, get_stats};
use crate::state::AppState;

pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/overview", get(get_overview))
        .route("/activity", get(get_activity))
}
