//! Brickify - photo to brick mosaic service
//!
//! HTTP and CLI front end around the `brick-mosaic` conversion core.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
