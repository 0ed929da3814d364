//! API module for the recommendation service contract
//!
//! The backend is an opaque HTTP service. This module holds ONLY the shared
//! wire types and constants describing `POST /api/recommend`; the HTTP
//! plumbing lives in the client crate.

pub mod types;

pub use types::{ObjectsField, RecommendResponse, SongEntry};

/// Path of the recommendation endpoint, relative to the server URL
pub const RECOMMEND_PATH: &str = "/api/recommend";

/// Multipart field carrying the image payload
pub const IMAGE_FIELD: &str = "image";

/// Fallback message when the server gives no usable error text
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to get recommendations";
