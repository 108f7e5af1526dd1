use async_trait::async_trait;
use reqwest::{header, multipart::Form};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

pub const SYNTHESIS_STYLE: &str = "podcast";

/// What the PlayNote API echoes back after accepting a synthesis request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayNoteResponse {
    pub id: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source_file_urls: Vec<String>,
    #[serde(default)]
    pub synthesis_style: String,
    #[serde(default)]
    pub voice1: serde_json::Value,
    #[serde(default)]
    pub voice2: serde_json::Value,
    #[serde(default)]
    pub requested_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicePair {
    pub voice1: String,
    pub voice1_name: String,
    pub voice2: String,
    pub voice2_name: String,
}

impl VoicePair {
    pub fn from_config(config: &Config) -> Self {
        VoicePair {
            voice1: config.voice1.clone(),
            voice1_name: config.voice1_name.clone(),
            voice2: config.voice2.clone(),
            voice2_name: config.voice2_name.clone(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PodcastSynthesizer: Send + Sync {
    /// Submits a document URL for two-voice podcast synthesis.
    async fn request_podcast(&self, source_file_url: &str) -> AppResult<PlayNoteResponse>;
}

pub struct PlayNoteClient {
    http: reqwest::Client,
    api_url: String,
    api_key: SecretString,
    user_id: String,
    voices: VoicePair,
}

impl PlayNoteClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.playnote_api_url.clone(),
            api_key: config.playnote_api_key.clone(),
            user_id: config.playnote_user_id.clone(),
            voices: VoicePair::from_config(config),
        }
    }

    fn authorization(&self) -> String {
        let key = self.api_key.expose_secret();
        if key.starts_with("Bearer ") {
            key.to_string()
        } else {
            format!("Bearer {}", key)
        }
    }

    fn build_form(&self, source_file_url: &str) -> Form {
        Form::new()
            .text("sourceFileUrl", source_file_url.to_string())
            .text("synthesisStyle", SYNTHESIS_STYLE)
            .text("voice1", self.voices.voice1.clone())
            .text("voice1Name", self.voices.voice1_name.clone())
            .text("voice2", self.voices.voice2.clone())
            .text("voice2Name", self.voices.voice2_name.clone())
    }
}

#[async_trait]
impl PodcastSynthesizer for PlayNoteClient {
    async fn request_podcast(&self, source_file_url: &str) -> AppResult<PlayNoteResponse> {
        log::info!("Requesting podcast synthesis for {}", source_file_url);

        let response = self
            .http
            .post(&self.api_url)
            .header(header::AUTHORIZATION, self.authorization())
            .header("X-USER-ID", &self.user_id)
            .header(header::ACCEPT, "application/json")
            .multipart(self.build_form(source_file_url))
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach PlayNote API: {}", e);
                AppError::GenerationFailed(format!("Failed to reach synthesis API: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response body".to_string());
            log::error!("PlayNote API error ({}): {}", status, body);
            return Err(AppError::GenerationFailed(format!(
                "Failed to generate podcast: {}",
                body
            )));
        }

        let note = response.json::<PlayNoteResponse>().await.map_err(|e| {
            log::error!("Failed to parse PlayNote response: {}", e);
            AppError::GenerationFailed(format!("Invalid synthesis API response: {}", e))
        })?;

        log::info!("PlayNote accepted request, id {}", note.id);
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_key(key: &str) -> PlayNoteClient {
        let mut config = Config::test_config();
        config.playnote_api_key = SecretString::from(key.to_string());
        PlayNoteClient::new(reqwest::Client::new(), &config)
    }

    #[test]
    fn authorization_adds_bearer_prefix_once() {
        assert_eq!(client_with_key("abc").authorization(), "Bearer abc");
        assert_eq!(client_with_key("Bearer abc").authorization(), "Bearer abc");
    }

    #[test]
    fn voice_pair_defaults_to_fixed_voices() {
        let voices = VoicePair::from_config(&Config::test_config());

        assert_eq!(voices.voice1_name, "Angelo");
        assert_eq!(voices.voice2_name, "Deedee");
        assert!(voices.voice1.ends_with("/original/manifest.json"));
    }

    #[test]
    fn playnote_response_tolerates_missing_optional_fields() {
        let note: PlayNoteResponse = serde_json::from_str(r#"{"id": "p1"}"#).unwrap();

        assert_eq!(note.id, "p1");
        assert!(note.source_file_urls.is_empty());
        assert_eq!(note.voice1, serde_json::Value::Null);
    }

    #[test]
    fn playnote_response_reads_camel_case() {
        let note: PlayNoteResponse = serde_json::from_str(
            r#"{
                "id": "p1",
                "ownerId": "o1",
                "name": "Lecture",
                "sourceFileUrls": ["https://x/y.pdf"],
                "synthesisStyle": "podcast",
                "voice1": "Angelo",
                "voice2": "Deedee",
                "requestedAt": "2024-05-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(note.owner_id, "o1");
        assert_eq!(note.source_file_urls, vec!["https://x/y.pdf"]);
        assert_eq!(note.requested_at.as_deref(), Some("2024-05-01T10:00:00Z"));
    }
}
