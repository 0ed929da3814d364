//! Recommendation service client
//!
//! Sends the staged image as a single-part multipart body to
//! `POST {server}/api/recommend` and classifies the outcome. One request per
//! call, no retry.

use crate::error::UploadError;
use crate::models::{AnalysisResult, Song};
use crate::selection::StagedFile;
use async_trait::async_trait;
use moodtune_common::api::{
    RecommendResponse, GENERIC_FAILURE_MESSAGE, IMAGE_FIELD, RECOMMEND_PATH,
};
use moodtune_common::config::ClientConfig;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

const USER_AGENT: &str = concat!("MoodTune/", env!("CARGO_PKG_VERSION"));

/// Successful recommendation payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub analysis: AnalysisResult,
    /// Server order (ranked)
    pub songs: Vec<Song>,
}

impl Recommendation {
    pub fn from_response(response: RecommendResponse) -> Self {
        let analysis = AnalysisResult::from_response(&response);
        Self {
            analysis,
            songs: response.playlist.unwrap_or_default(),
        }
    }
}

/// Anything that can turn a staged image into a recommendation
#[async_trait]
pub trait RecommendBackend: Send + Sync {
    async fn recommend(&self, file: &StagedFile) -> Result<Recommendation, UploadError>;
}

/// Classify a response by status and body
///
/// Non-2xx, an unparseable body, or `success != true` all fail with the
/// server's `error` text when it has one, else the generic message.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Recommendation, UploadError> {
    let parsed = serde_json::from_slice::<RecommendResponse>(body);
    let ok_status = (200..300).contains(&status);

    match parsed {
        Ok(response) if ok_status && response.success => Ok(Recommendation::from_response(response)),
        Ok(response) => Err(UploadError::ServerFailure {
            status,
            message: response
                .error_message()
                .unwrap_or(GENERIC_FAILURE_MESSAGE)
                .to_string(),
        }),
        Err(e) => {
            tracing::warn!(status, error = %e, "Unparseable recommendation response");
            Err(UploadError::ServerFailure {
                status,
                message: GENERIC_FAILURE_MESSAGE.to_string(),
            })
        }
    }
}

/// HTTP client for the recommendation service
pub struct RecommendClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl RecommendClient {
    /// `server_url` is the base URL without the endpoint path
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, UploadError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::TransportFailure(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), RECOMMEND_PATH),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, UploadError> {
        Self::new(&config.server_url, config.request_timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecommendBackend for RecommendClient {
    async fn recommend(&self, file: &StagedFile) -> Result<Recommendation, UploadError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.content_type())
            .map_err(|e| UploadError::TransportFailure(format!("Invalid content type: {}", e)))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        tracing::debug!(
            endpoint = %self.endpoint,
            file = %file.name(),
            size = file.bytes().len(),
            "Submitting image for recommendation"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::TransportFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UploadError::TransportFailure(e.to_string()))?;

        let result = interpret_response(status.as_u16(), &body);
        match &result {
            Ok(rec) => tracing::info!(
                status = status.as_u16(),
                songs = rec.songs.len(),
                "Recommendation received"
            ),
            Err(e) => tracing::warn!(status = status.as_u16(), error = %e, "Recommendation failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodtune_common::api::ObjectsField;

    #[test]
    fn test_success_payload() {
        let body = br##"{
            "success": true,
            "emotion": "happy",
            "scene": "park",
            "objects": "dog",
            "playlist": [{"title": "T", "artist": "A", "link": "#"}]
        }"##;
        let rec = interpret_response(200, body).unwrap();
        assert_eq!(rec.analysis.emotion.as_deref(), Some("happy"));
        assert_eq!(rec.analysis.objects, Some(ObjectsField::Single("dog".to_string())));
        assert_eq!(rec.songs.len(), 1);
    }

    #[test]
    fn test_missing_playlist_defaults_to_empty() {
        let rec = interpret_response(200, br#"{"success": true}"#).unwrap();
        assert!(rec.songs.is_empty());
        assert_eq!(rec.analysis, AnalysisResult::default());
    }

    #[test]
    fn test_success_false_uses_server_message() {
        let err = interpret_response(200, br#"{"success": false, "error": "no face detected"}"#)
            .unwrap_err();
        assert_eq!(err.user_message(), "no face detected");
    }

    #[test]
    fn test_success_absent_is_failure() {
        let err = interpret_response(200, br#"{"emotion": "happy"}"#).unwrap_err();
        assert_eq!(err.user_message(), "Failed to get recommendations");
    }

    #[test]
    fn test_non_2xx_with_error_body() {
        let err = interpret_response(400, br#"{"error": "No image file provided"}"#).unwrap_err();
        assert_eq!(
            err,
            UploadError::ServerFailure {
                status: 400,
                message: "No image file provided".to_string()
            }
        );
    }

    #[test]
    fn test_non_2xx_even_with_success_flag() {
        let err = interpret_response(500, br#"{"success": true}"#).unwrap_err();
        assert_eq!(err.user_message(), "Failed to get recommendations");
    }

    #[test]
    fn test_unparseable_body() {
        let err = interpret_response(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.user_message(), "Failed to get recommendations");
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = RecommendClient::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/api/recommend");
    }
}
