//! Request extractors.
//!
//! - [`auth::AuthUser`]: requires a live session; rejects with 401 and
//!   `redirect_to: "/auth"` otherwise
//! - [`crate::modules::auth::session::SessionContext`]: resolves the session
//!   without rejecting, for endpoints that report session state

pub mod auth;
