//! Air quality dashboard
//!
//! Fetches the latest OpenAQ readings for a bounding box and renders one
//! card per monitoring location. The library exposes the modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod state;
