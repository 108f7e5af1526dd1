use std::pin::Pin;

use async_openai::{config::OpenAIConfig, error::OpenAIError, Client};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use schemars::{schema_for, JsonSchema};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    config::Config,
    constants::prompts::{
        quiz_user_prompt, QUIZ_SYSTEM_PROMPT, SUMMARY_SYSTEM_PROMPT, SUMMARY_USER_PROMPT,
    },
    errors::{AppError, AppResult},
    models::{domain::QuizQuestion, dto::request::InlineFile},
};

pub type TextStream = Pin<Box<dyn Stream<Item = AppResult<String>> + Send>>;

/// Quiz as the model is asked to produce it.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct GeneratedQuiz {
    pub title: String,
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl GeneratedQuiz {
    /// Checks the model output and converts it into stored questions.
    ///
    /// Every question needs at least two options and a correct answer that is
    /// one of them.
    pub fn into_questions(self) -> AppResult<Vec<QuizQuestion>> {
        if self.questions.is_empty() {
            return Err(AppError::GenerationFailed(
                "Model returned a quiz without questions".to_string(),
            ));
        }

        self.questions
            .into_iter()
            .enumerate()
            .map(|(index, q)| {
                if q.question.trim().is_empty() {
                    return Err(AppError::GenerationFailed(format!(
                        "Question {} has no prompt",
                        index + 1
                    )));
                }
                if q.options.len() < 2 {
                    return Err(AppError::GenerationFailed(format!(
                        "Question {} has fewer than two options",
                        index + 1
                    )));
                }
                if !q.options.iter().any(|o| o == &q.correct_answer) {
                    return Err(AppError::GenerationFailed(format!(
                        "Question {} has a correct answer that is not an option",
                        index + 1
                    )));
                }
                Ok(QuizQuestion {
                    question: q.question,
                    options: q.options,
                    correct_answer: q.correct_answer,
                })
            })
            .collect()
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentModel: Send + Sync {
    /// Streams a markdown summary of `file` as text deltas.
    async fn stream_summary(&self, file: &InlineFile) -> AppResult<TextStream>;

    async fn generate_quiz(&self, file: &InlineFile, question_count: u8)
        -> AppResult<GeneratedQuiz>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

impl ChatChunk {
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .filter_map(|c| c.delta.content)
            .collect()
    }
}

fn model_error(context: &str, err: OpenAIError) -> AppError {
    log::error!("{}: {}", context, err);
    AppError::GenerationFailed(format!("{}: {}", context, err))
}

/// Builds a user message carrying `text` and the document inline.
fn document_message(text: &str, file: &InlineFile) -> AppResult<Value> {
    let data_url = file
        .data_url()
        .ok_or_else(|| AppError::GenerationFailed("No file data provided".to_string()))?;

    Ok(json!({
        "role": "user",
        "content": [
            { "type": "text", "text": text },
            {
                "type": "file",
                "file": { "filename": "document.pdf", "file_data": data_url }
            }
        ]
    }))
}

fn json_schema_format<T: JsonSchema>(name: &str) -> Value {
    let mut schema = serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| json!({}));
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
    }

    json!({
        "type": "json_schema",
        "json_schema": { "name": name, "schema": schema }
    })
}

/// Talks to any OpenAI-compatible chat completion endpoint.
pub struct OpenAiDocumentModel {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiDocumentModel {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.llm_api_key.expose_secret())
            .with_api_base(&config.llm_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.llm_model.clone(),
        }
    }

    fn summary_request(&self, file: &InlineFile) -> AppResult<Value> {
        Ok(json!({
            "model": self.model,
            "stream": true,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": SUMMARY_SYSTEM_PROMPT },
                document_message(SUMMARY_USER_PROMPT, file)?
            ]
        }))
    }

    fn quiz_request(&self, file: &InlineFile, question_count: u8) -> AppResult<Value> {
        Ok(json!({
            "model": self.model,
            "response_format": json_schema_format::<GeneratedQuiz>("generated_quiz"),
            "messages": [
                { "role": "system", "content": QUIZ_SYSTEM_PROMPT },
                document_message(&quiz_user_prompt(question_count), file)?
            ]
        }))
    }
}

#[async_trait]
impl DocumentModel for OpenAiDocumentModel {
    async fn stream_summary(&self, file: &InlineFile) -> AppResult<TextStream> {
        let request = self.summary_request(file)?;

        let stream = self
            .client
            .chat()
            .create_stream_byot::<Value, ChatChunk>(request)
            .await
            .map_err(|e| model_error("Failed to start summary stream", e))?;

        let text = stream.filter_map(|chunk| async move {
            match chunk {
                Ok(chunk) => {
                    let text = chunk.into_text();
                    (!text.is_empty()).then_some(Ok(text))
                }
                Err(e) => Some(Err(model_error("Summary stream failed", e))),
            }
        });

        Ok(Box::pin(text))
    }

    async fn generate_quiz(
        &self,
        file: &InlineFile,
        question_count: u8,
    ) -> AppResult<GeneratedQuiz> {
        let request = self.quiz_request(file, question_count)?;

        let completion: ChatCompletion = self
            .client
            .chat()
            .create_byot(request)
            .await
            .map_err(|e| model_error("Quiz generation failed", e))?;

        let content = completion
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| {
                AppError::GenerationFailed("Model returned an empty response".to_string())
            })?;

        serde_json::from_str(&content).map_err(|e| {
            log::error!("Model returned malformed quiz JSON: {}", e);
            AppError::GenerationFailed(format!("Malformed quiz from model: {}", e))
        })
    }
}
