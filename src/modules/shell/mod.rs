//! The frame shared by protected views: header, sidebar and navigation.

pub mod controller;
pub mod navigation;
pub mod router;
