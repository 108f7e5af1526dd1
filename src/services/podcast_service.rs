use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{PodcastNote, PodcastStatus},
        dto::{request::CreatePodcastRequest, response::CreatePodcastResponse},
    },
    repositories::PodcastNoteRepository,
    services::playnote_client::{PlayNoteResponse, PodcastSynthesizer},
};

pub struct PodcastService {
    repository: Arc<dyn PodcastNoteRepository>,
    synthesizer: Arc<dyn PodcastSynthesizer>,
}

fn voice_label(voice: &Value) -> String {
    match voice {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn note_from_response(
    user_id: &str,
    source_file_url: &str,
    file_name: Option<String>,
    response: &PlayNoteResponse,
) -> PodcastNote {
    let name = if response.name.is_empty() {
        file_name.clone().unwrap_or_else(|| source_file_url.to_string())
    } else {
        response.name.clone()
    };

    PodcastNote {
        id: response.id.clone(),
        user_id: user_id.to_string(),
        owner_id: response.owner_id.clone(),
        name,
        source_file_url: source_file_url.to_string(),
        audio_url: None,
        synthesis_style: response.synthesis_style.clone(),
        voice1: voice_label(&response.voice1),
        voice2: voice_label(&response.voice2),
        status: PodcastStatus::Generating,
        duration: None,
        requested_at: response.requested_at.clone(),
        created_at: Utc::now(),
        original_filename: file_name,
    }
}

impl PodcastService {
    pub fn new(
        repository: Arc<dyn PodcastNoteRepository>,
        synthesizer: Arc<dyn PodcastSynthesizer>,
    ) -> Self {
        Self {
            repository,
            synthesizer,
        }
    }

    /// Submits the document for synthesis and records a `generating` note.
    ///
    /// Every failure is reported as `GenerationFailed`.
    pub async fn create_podcast(
        &self,
        user_id: &str,
        request: CreatePodcastRequest,
    ) -> AppResult<CreatePodcastResponse> {
        request
            .validate()
            .map_err(|e| AppError::GenerationFailed(format!("Invalid request: {}", e)))?;

        let response = self.synthesizer.request_podcast(&request.pdf_url).await?;

        let note = note_from_response(user_id, &request.pdf_url, request.file_name, &response);
        self.repository.create(note).await.map_err(|e| {
            log::error!("Failed to store podcast note {}: {}", response.id, e);
            AppError::GenerationFailed(format!("Failed to store podcast: {}", e))
        })?;

        Ok(CreatePodcastResponse {
            success: true,
            play_note_id: response.id,
            owner_id: response.owner_id,
            name: response.name,
            source_file_urls: response.source_file_urls,
            synthesis_style: response.synthesis_style,
            voice1: response.voice1,
            voice2: response.voice2,
            requested_at: response.requested_at,
            status: "generating".to_string(),
        })
    }

    pub async fn list(&self, user_id: &str) -> AppResult<Vec<PodcastNote>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn get(&self, id: &str, user_id: &str) -> AppResult<PodcastNote> {
        let note = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Podcast with id '{}' not found", id)))?;

        if note.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not own this podcast".to_string(),
            ));
        }
        Ok(note)
    }
}
