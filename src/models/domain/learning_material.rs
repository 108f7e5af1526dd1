use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PDF_MATERIAL_TYPE: &str = "pdf";

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN is a valid regex pattern"));

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct LearningMaterial {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    #[graphql(name = "type")]
    pub material_type: String,
    pub size: i64,
    pub url: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

impl LearningMaterial {
    pub fn new_pdf(user_id: &str, name: &str, size: i64, file_path: &str, url: &str) -> Self {
        LearningMaterial {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            material_type: PDF_MATERIAL_TYPE.to_string(),
            size,
            url: url.to_string(),
            file_path: file_path.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Object key for an uploaded file: `{user_id}/{millis}-{name}` with
/// whitespace runs turned into `-` and path separators dropped from the name.
pub fn storage_path(user_id: &str, file_name: &str, uploaded_at: DateTime<Utc>) -> String {
    let cleaned: String = file_name
        .trim()
        .chars()
        .filter(|c| *c != '/' && *c != '\\')
        .collect();
    let cleaned = WHITESPACE_RUN.replace_all(&cleaned, "-");

    format!(
        "{}/{}-{}",
        user_id,
        uploaded_at.timestamp_millis(),
        cleaned
    )
}
