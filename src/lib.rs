//! # Tuition Manager API
//!
//! Back office for a coaching institute, built with Axum and PostgreSQL.
//!
//! ## Overview
//!
//! - **Authentication**: email/password sign-in backed by server-side
//!   sessions, sign-up with email confirmation, sign-out
//! - **Dashboard**: student, teacher, upcoming-class and pending-fee
//!   statistics loaded concurrently, plus a weekly overview and activity feed
//! - **Shell**: the header and sidebar navigation around protected views
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # AuthUser / session extractors
//! ├── modules/
//! │   ├── auth/        # identity seam, gateway, session state
//! │   ├── dashboard/   # statistics, overview, activity
//! │   ├── shell/       # navigation frame
//! │   └── health.rs
//! └── utils/           # email, display formatting
//! ```
//!
//! Shared types live in the workspace crates: `tuition-core` (errors,
//! passwords), `tuition-config`, `tuition-db` (pool, migrations),
//! `tuition-auth` (JWT) and `tuition-models` (rows and DTOs).
//!
//! ## Sessions
//!
//! Access tokens name a row in `auth_sessions`. A request is authenticated
//! only while that row is neither revoked nor expired, so signing out takes
//! effect immediately. Protected endpoints answer unauthenticated callers
//! with `401 {"error": ..., "redirect_to": "/auth"}`.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

pub use tuition_auth;
pub use tuition_config;
pub use tuition_core;
pub use tuition_db;
pub use tuition_models;
