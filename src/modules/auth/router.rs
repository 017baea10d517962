use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_session, sign_in, sign_out, sign_up, verify_email};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(sign_in))
        .route("/sign-up", post(sign_up))
        .route("/sign-out", post(sign_out))
        .route("/verify-email", get(verify_email))
        .route("/session", get(get_session))
}
