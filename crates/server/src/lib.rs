//! HTTP query service for the video game catalog.

pub mod api;
pub mod metrics;
pub mod state;
