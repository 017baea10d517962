//! # Tuition Models
//!
//! Row types mirroring the schema contract in `migrations/`, plus the
//! request/response DTOs of the HTTP API.
//!
//! # Modules
//!
//! - [`enums`]: PostgreSQL enumerations (`class_type`, `gender_type`,
//!   `payment_mode_type`, `user_role_type`)
//! - [`lookups`]: standards, batches and subjects
//! - [`students`], [`teachers`], [`classes`], [`fees`]: core institute records
//! - [`users`]: identities and user profiles
//! - [`auth`]: sign-in / sign-up / session DTOs
//! - [`dashboard`]: stats summary, weekly overview and activity feed
//! - [`shell`]: navigation shell view
//!
//! Monetary columns are `NUMERIC` in the schema and are read as `f64`
//! (selects cast them with `::float8`).

pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod enums;
pub mod fees;
pub mod lookups;
pub mod shell;
pub mod students;
pub mod teachers;
pub mod users;

pub use auth::{
    MessageResponse, SessionStatusResponse, SignInRequest, SignInResponse, SignOutResponse,
    SignUpRequest, SignUpResponse, VerifyEmailQuery,
};
pub use classes::Class;
pub use dashboard::{
    ActivityItem, ActivityQuery, ActivityStatus, ActivityType, DashboardStats,
    DashboardStatsResponse, NextClass, Notification, NotificationVariant, WeeklyOverview,
};
pub use enums::{ClassType, GenderType, PaymentMode, UserRole};
pub use fees::{FeePayment, FeesPlan};
pub use lookups::{Batch, Standard, Subject};
pub use shell::{NavigationEntry, ShellQuery, ShellView, SidebarFooter, SidebarMode};
pub use students::Student;
pub use teachers::Teacher;
pub use users::{SessionUser, UserProfile};
