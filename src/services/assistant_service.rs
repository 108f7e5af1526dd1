use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    constants::prompts::ASSISTANT_PROMPT,
    errors::{AppError, AppResult},
};

pub const SECTIONS: [&str; 5] = ["quiz", "podcast", "materials", "summarize", "ai-assistant"];

/// An event raised by the embedded voice assistant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAssistantEvent")]
pub enum AssistantEvent {
    GenerateQuiz { topic: Option<String> },
    CreatePodcast { topic: Option<String> },
    ShowSection { section: String },
}

/// Wire shape `{ name, data }`; `data` may be absent or of any shape.
#[derive(Deserialize)]
struct RawAssistantEvent {
    name: String,
    #[serde(default)]
    data: Value,
}

fn data_str(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

impl TryFrom<RawAssistantEvent> for AssistantEvent {
    type Error = String;

    fn try_from(raw: RawAssistantEvent) -> Result<Self, Self::Error> {
        match raw.name.as_str() {
            "generate-quiz" => Ok(AssistantEvent::GenerateQuiz {
                topic: data_str(&raw.data, "topic"),
            }),
            "create-podcast" => Ok(AssistantEvent::CreatePodcast {
                topic: data_str(&raw.data, "topic"),
            }),
            "show-section" => data_str(&raw.data, "section")
                .map(|section| AssistantEvent::ShowSection { section })
                .ok_or_else(|| "show-section requires a string 'section'".to_string()),
            other => Err(format!("Unknown assistant event '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDefinition {
    pub name: &'static str,
    pub when: &'static str,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantConfig {
    pub web_embed_id: String,
    pub events: Vec<EventDefinition>,
    pub prompt: &'static str,
}

pub fn event_definitions() -> Vec<EventDefinition> {
    vec![
        EventDefinition {
            name: "generate-quiz",
            when: "The user wants to generate a quiz on a specific topic",
            data: json!({
                "topic": { "type": "string", "description": "The topic to generate a quiz about" }
            }),
        },
        EventDefinition {
            name: "create-podcast",
            when: "The user wants to create a podcast from study materials",
            data: json!({
                "topic": { "type": "string", "description": "The topic or subject of the podcast" }
            }),
        },
        EventDefinition {
            name: "show-section",
            when: "The user wants to see a specific section",
            data: json!({
                "section": { "type": "string", "description": "The section to show (quiz/podcast)" }
            }),
        },
    ]
}

pub struct AssistantService {
    web_embed_id: String,
}

impl AssistantService {
    pub fn new(web_embed_id: &str) -> Self {
        Self {
            web_embed_id: web_embed_id.to_string(),
        }
    }

    pub fn config(&self) -> AssistantConfig {
        AssistantConfig {
            web_embed_id: self.web_embed_id.clone(),
            events: event_definitions(),
            prompt: ASSISTANT_PROMPT,
        }
    }

    /// Client route the app should navigate to for `event`.
    pub fn route(&self, event: &AssistantEvent) -> AppResult<String> {
        match event {
            AssistantEvent::GenerateQuiz { .. } => Ok("/quiz/new".to_string()),
            AssistantEvent::CreatePodcast { .. } => Ok("/podcast".to_string()),
            AssistantEvent::ShowSection { section } => {
                let section = section.trim().trim_matches('/');
                if SECTIONS.contains(&section) {
                    Ok(format!("/{}", section))
                } else {
                    Err(AppError::ValidationError(format!(
                        "Unknown section '{}'",
                        section
                    )))
                }
            }
        }
    }
}
