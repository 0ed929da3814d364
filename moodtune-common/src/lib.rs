//! # MoodTune Common Library
//!
//! Shared code for the MoodTune client crates including:
//! - Recommendation API wire types (request field names, response payload)
//! - Configuration loading (TOML bootstrap + environment overrides)
//! - Common error type

pub mod api;
pub mod config;
pub mod error;

pub use error::{Error, Result};
