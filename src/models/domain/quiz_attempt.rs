use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub score: i32,
    pub question_responses: Vec<QuestionResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuestionResponse {
    pub question_index: i32,
    pub question: String,
    pub selected_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl QuizAttempt {
    pub fn new(
        quiz_id: &str,
        user_id: &str,
        score: i32,
        question_responses: Vec<QuestionResponse>,
    ) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            user_id: user_id.to_string(),
            score,
            question_responses,
            created_at: Utc::now(),
        }
    }

    pub fn correct_count(&self) -> usize {
        self.question_responses
            .iter()
            .filter(|r| r.is_correct)
            .count()
    }
}
