//! Workflow data model

use moodtune_common::api::{ObjectsField, RecommendResponse};

/// One recommended track (immutable once received)
pub use moodtune_common::api::SongEntry as Song;

/// Emotion/scene/object summary returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    pub emotion: Option<String>,
    pub scene: Option<String>,
    pub objects: Option<ObjectsField>,
}

impl AnalysisResult {
    /// Extract the analysis fields from a response payload
    pub fn from_response(response: &RecommendResponse) -> Self {
        Self {
            emotion: response.emotion.clone(),
            scene: response.scene.clone(),
            objects: response.objects.clone(),
        }
    }
}
