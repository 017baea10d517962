//! Authentication: sign-in, sign-up, sign-out and session resolution.
//!
//! - [`identity`]: the identity provider seam and its Postgres implementation
//! - [`service`]: [`service::AuthGateway`], which applies the sign-up password
//!   rules before delegating to the identity provider
//! - [`session`]: per-request session state and the protected-view gate

pub mod controller;
pub mod identity;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
