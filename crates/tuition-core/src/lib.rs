//! # Tuition Core
//!
//! Foundational types shared by every Tuition Manager crate:
//!
//! - [`errors`]: [`AppError`], the error type returned by services and handlers
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use tuition_core::{AppError, hash_password};
//!
//! let hash = hash_password("secret-password")?;
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{MIN_PASSWORD_LENGTH, hash_password, verify_password};
