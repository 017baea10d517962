use sqlx::PgPool;

use tuition_config::{CorsConfig, EmailConfig, JwtConfig};
use tuition_db::{DbInitError, init_db_pool};

use crate::modules::dashboard::view::DashboardViews;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
    pub dashboard_views: DashboardViews,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            email_config: EmailConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            dashboard_views: DashboardViews::new(),
        }
    }
}

pub async fn init_app_state() -> Result<AppState, DbInitError> {
    Ok(AppState::new(init_db_pool().await?))
}
