//! # Tuition CLI
//!
//! Administrative and seeding utilities for Tuition Manager development.
//!
//! ## Usage
//!
//! ```ignore
//! use tuition_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(150).with_teachers(10);
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;
