use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::quiz_question::QuizQuestion;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Quiz {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
    /// Percentage from the most recent completed attempt.
    #[serde(default)]
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn new(user_id: &str, title: &str, questions: Vec<QuizQuestion>) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            questions,
            score: None,
            created_at: Utc::now(),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
