use axum::{Router, routing::get};

use super::controller::get_shell;
use crate::state::AppState;

pub fn init_shell_router() -> Router<AppState> {
    Router::new().route("/", get(get_shell))
}
