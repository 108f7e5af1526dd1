use async_graphql::{Enum, SimpleObject};
use serde::Serialize;

use crate::models::domain::{
    QuestionResponse, QuizQuestion, QuizSession, QuizSessionState,
};

/// Relayed PlayNote fields plus the locally assigned `generating` status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePodcastResponse {
    pub success: bool,
    pub play_note_id: String,
    pub owner_id: String,
    pub name: String,
    pub source_file_urls: Vec<String>,
    pub synthesis_style: String,
    pub voice1: serde_json::Value,
    pub voice2: serde_json::Value,
    pub requested_at: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum QuizSessionPhase {
    Question,
    Results,
}

/// A question as shown to the quiz taker, without its answer.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
}

impl From<&QuizQuestion> for QuestionView {
    fn from(question: &QuizQuestion) -> Self {
        QuestionView {
            question: question.question.clone(),
            options: question.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizSessionView {
    pub session_id: String,
    pub quiz_id: String,
    pub title: String,
    pub phase: QuizSessionPhase,
    pub question_index: Option<i32>,
    pub question_count: i32,
    pub current_question: Option<QuestionView>,
    /// Filled once the session reaches its results.
    pub responses: Vec<QuestionResponse>,
    pub score: Option<i32>,
}

impl From<&QuizSession> for QuizSessionView {
    fn from(session: &QuizSession) -> Self {
        let (phase, question_index, responses) = match session.state() {
            QuizSessionState::Question(index) => {
                (QuizSessionPhase::Question, Some(index as i32), Vec::new())
            }
            QuizSessionState::Results => (
                QuizSessionPhase::Results,
                None,
                session.responses().to_vec(),
            ),
        };

        QuizSessionView {
            session_id: session.id.clone(),
            quiz_id: session.quiz_id.clone(),
            title: session.title.clone(),
            phase,
            question_index,
            question_count: session.question_count() as i32,
            current_question: session.current_question().map(QuestionView::from),
            responses,
            score: session.score(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantRouteResponse {
    pub route: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Quiz;

    #[test]
    fn session_view_hides_correct_answer_while_in_progress() {
        let quiz = Quiz::new(
            "user-1",
            "Geography",
            vec![QuizQuestion::new("Capital of Italy?", &["Rome", "Milan"], "Rome")],
        );
        let session = QuizSession::start(&quiz, "user-1").unwrap();
        let view = QuizSessionView::from(&session);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(view.phase, QuizSessionPhase::Question);
        assert_eq!(view.question_index, Some(0));
        assert_eq!(json["current_question"]["options"][0], "Rome");
        assert!(json["current_question"].get("correct_answer").is_none());
        assert!(view.responses.is_empty());
    }

    #[test]
    fn create_podcast_response_uses_camel_case() {
        let response = CreatePodcastResponse {
            success: true,
            play_note_id: "p1".to_string(),
            owner_id: "o1".to_string(),
            name: "Notes".to_string(),
            source_file_urls: vec!["https://x/y.pdf".to_string()],
            synthesis_style: "podcast".to_string(),
            voice1: serde_json::json!("Angelo"),
            voice2: serde_json::json!("Deedee"),
            requested_at: None,
            status: "generating".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["playNoteId"], "p1");
        assert_eq!(json["ownerId"], "o1");
        assert_eq!(json["sourceFileUrls"][0], "https://x/y.pdf");
        assert_eq!(json["status"], "generating");
    }
}
