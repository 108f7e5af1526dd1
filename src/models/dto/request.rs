use async_graphql::InputObject;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_FILE_MIME_TYPE: &str = "application/pdf";
pub const DEFAULT_QUESTION_COUNT: u8 = 4;

fn default_mime_type() -> String {
    DEFAULT_FILE_MIME_TYPE.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePodcastRequest {
    #[validate(url)]
    pub pdf_url: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub file_name: Option<String>,
}

/// A file sent inline with a request, usually as a `data:` URL produced by
/// the browser's `FileReader`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineFile {
    #[serde(default)]
    pub data: Option<String>,

    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

impl InlineFile {
    pub fn has_data(&self) -> bool {
        self.data.as_deref().is_some_and(|d| !d.trim().is_empty())
    }

    /// The payload as a `data:` URL, wrapping bare base64 when needed.
    pub fn data_url(&self) -> Option<String> {
        let data = self.data.as_deref()?.trim();
        if data.is_empty() {
            return None;
        }
        if data.starts_with("data:") {
            return Some(data.to_string());
        }
        Some(format!("data:{};base64,{}", self.mime_type, data))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryPrompt {
    #[serde(default)]
    pub files: Vec<InlineFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSummaryRequest {
    #[serde(default)]
    pub prompt: SummaryPrompt,
}

impl GenerateSummaryRequest {
    pub fn first_file(&self) -> Option<&InlineFile> {
        self.prompt.files.first().filter(|f| f.has_data())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, max = 20))]
    pub question_count: Option<u8>,

    #[serde(default)]
    #[validate(length(min = 1, message = "At least one file is required"))]
    pub files: Vec<InlineFile>,
}

impl GenerateQuizRequest {
    pub fn question_count(&self) -> u8 {
        self.question_count.unwrap_or(DEFAULT_QUESTION_COUNT)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadMaterialQuery {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct AnswerQuestionRequest {
    #[validate(length(max = 2000))]
    pub answer: String,
}
