use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PodcastStatus {
    Generating,
    Completed,
    Failed,
}

impl PodcastStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PodcastStatus::Generating)
    }
}

/// A request for (and eventually the result of) a two-voice audio rendition
/// of a learning material, synthesized by the PlayNote API.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct PodcastNote {
    /// Identifier assigned by the synthesis API.
    pub id: String,
    pub user_id: String,
    pub owner_id: String,
    pub name: String,
    pub source_file_url: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    pub synthesis_style: String,
    pub voice1: String,
    pub voice2: String,
    pub status: PodcastStatus,
    #[serde(default)]
    pub duration: Option<f64>,
    pub requested_at: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}
