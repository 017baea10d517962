use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use tuition_core::AppError;
use tuition_models::{
    MessageResponse, SessionStatusResponse, SignInRequest, SignInResponse, SignOutResponse,
    SignUpRequest, SignUpResponse, VerifyEmailQuery,
};

use super::identity::PgIdentityService;
use super::service::AuthGateway;
use super::session::SessionContext;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Present when the client should navigate, e.g. to `/auth`.
    pub redirect_to: Option<String>,
}

fn gateway(state: &AppState) -> AuthGateway<PgIdentityService> {
    AuthGateway::new(PgIdentityService::from_state(state))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SignInResponse),
        (status = 401, description = "Invalid login credentials", body = ErrorResponse),
        (status = 403, description = "Email not confirmed", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    let response = gateway(&state).sign_in(dto).await?;
    Ok(Json(response))
}

/// Register a staff account; a verification link is emailed
#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created, awaiting email confirmation", body = SignUpResponse),
        (status = 400, description = "User already registered", body = ErrorResponse),
        (status = 422, description = "Password mismatch or too short", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), AppError> {
    let response = gateway(&state).sign_up(dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Confirm an email address from a verification link
#[utoipa::path(
    get,
    path = "/api/auth/verify-email",
    params(VerifyEmailQuery),
    responses(
        (status = 200, description = "Email confirmed", body = MessageResponse),
        (status = 400, description = "Invalid or expired verification link", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, query))]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = gateway(&state).confirm_email(&query.token).await?;
    Ok(Json(response))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Signed out", body = SignOutResponse),
        (status = 401, description = "No active session", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, context))]
pub async fn sign_out(
    State(state): State<AppState>,
    mut context: SessionContext,
) -> Result<Json<SignOutResponse>, AppError> {
    let session_id = context.active().map(|session| session.session_id);

    let result = gateway(&state).sign_out(&mut context).await;

    if let Some(session_id) = session_id {
        state.dashboard_views.teardown(session_id).await;
    }

    Ok(Json(result?))
}

/// Current session state: `authenticated` or `unauthenticated`
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session state", body = SessionStatusResponse)
    ),
    security((), ("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(context))]
pub async fn get_session(context: SessionContext) -> Json<SessionStatusResponse> {
    Json(context.status())
}
