//! Recommendation API response types
//!
//! Mirrors the JSON body returned by `POST /api/recommend`:
//!
//! ```json
//! {
//!   "success": true,
//!   "emotion": "happy",
//!   "scene": "beach",
//!   "objects": ["sun", "umbrella"],
//!   "playlist": [{ "title": "...", "artist": "...", "link": "..." }]
//! }
//! ```
//!
//! Every field except `success` may be missing or `null`.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Detected objects as reported by the backend
///
/// The service has been observed to send either a list of labels or a single
/// pre-formatted string. Whether the bare string is a supported contract or a
/// fallback on the server side is still unresolved with the backend owners,
/// so both shapes are accepted and kept distinct for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ObjectsField {
    /// Ordered object labels, e.g. `["cat", "car"]`
    List(Vec<String>),
    /// Single free-form label, rendered verbatim
    Single(String),
}

/// One recommended track
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SongEntry {
    pub title: String,
    pub artist: String,
    /// Track URL (may be `"#"` when the backend has no track id)
    pub link: String,
}

/// Response body of `POST /api/recommend`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecommendResponse {
    /// Absent is treated the same as `false`
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,

    /// Values of any other shape are dropped rather than failing the response
    #[serde(
        default,
        deserialize_with = "lenient_objects",
        skip_serializing_if = "Option::is_none"
    )]
    pub objects: Option<ObjectsField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist: Option<Vec<SongEntry>>,

    /// User-facing failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendResponse {
    /// Server-provided error text, ignoring blank strings
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|msg| !msg.is_empty())
    }
}

fn lenient_objects<'de, D>(deserializer: D) -> Result<Option<ObjectsField>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match ObjectsField::deserialize(&value) {
        Ok(objects) => Ok(Some(objects)),
        Err(e) => {
            warn!("Ignoring unexpected objects value {}: {}", value, e);
            Ok(None)
        }
    }
}
