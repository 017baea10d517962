//! # Tuition Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetimes
//! - [`cors`]: allowed browser origins
//! - [`email`]: SMTP settings for verification mail
//! - [`server`]: bind address and startup behaviour
//!
//! Every struct exposes `from_env()`, falling back to development defaults
//! when a variable is unset or unparsable.
//!
//! # Example
//!
//! ```ignore
//! use tuition_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod email;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
