//! Dashboard statistics, weekly overview and activity feed.

pub mod controller;
pub mod router;
pub mod service;
pub mod source;
pub mod view;
