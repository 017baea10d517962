use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use tuition_models::{
    ActivityItem, ActivityStatus, ActivityType, ClassType, DashboardStats,
    DashboardStatsResponse, MessageResponse, NavigationEntry, NextClass, Notification,
    NotificationVariant, SessionStatusResponse, SessionUser, ShellView, SidebarFooter,
    SidebarMode, SignInRequest, SignInResponse, SignOutResponse, SignUpRequest, SignUpResponse,
    UserRole, WeeklyOverview,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health_check,
        crate::modules::auth::controller::sign_in,
        crate::modules::auth::controller::sign_up,
        crate::modules::auth::controller::verify_email,
        crate::modules::auth::controller::sign_out,
        crate::modules::auth::controller::get_session,
        crate::modules::dashboard::controller::get_stats,
        crate::modules::dashboard::controller::get_overview,
        crate::modules::dashboard::controller::get_activity,
        crate::modules::shell::controller::get_shell,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            SignInRequest,
            SignInResponse,
            SignUpRequest,
            SignUpResponse,
            SignOutResponse,
            MessageResponse,
            SessionStatusResponse,
            SessionUser,
            UserRole,
            DashboardStats,
            DashboardStatsResponse,
            Notification,
            NotificationVariant,
            WeeklyOverview,
            NextClass,
            ClassType,
            ActivityItem,
            ActivityType,
            ActivityStatus,
            ShellView,
            SidebarMode,
            NavigationEntry,
            SidebarFooter,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Sign-in, sign-up, sign-out and session state"),
        (name = "Dashboard", description = "Institute statistics and activity"),
        (name = "Shell", description = "Navigation frame around protected views")
    ),
    info(
        title = "Tuition Manager API",
        version = "0.1.0",
        description = "Back office for a coaching institute: staff accounts, dashboard statistics and the navigation shell.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
