use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{QuestionResponse, Quiz, QuizQuestion},
    services::quiz_attempt_service::QuizAttemptService,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizSessionState {
    Question(usize),
    Results,
}

/// One pass through a quiz: `Question(0) .. Question(N-1)` then `Results`.
#[derive(Clone, Debug)]
pub struct QuizSession {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub title: String,
    questions: Vec<QuizQuestion>,
    responses: Vec<QuestionResponse>,
    state: QuizSessionState,
    score: Option<i32>,
    pub started_at: DateTime<Utc>,
}

/// Outcome of grading the current question, before it is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAnswer {
    Advance(QuestionResponse),
    /// Last question answered: the full response list and the score that
    /// must be persisted before the session may enter `Results`.
    Complete {
        response: QuestionResponse,
        responses: Vec<QuestionResponse>,
        score: i32,
    },
}

impl QuizSession {
    pub fn start(quiz: &Quiz, user_id: &str) -> AppResult<Self> {
        if quiz.questions.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Quiz '{}' has no questions",
                quiz.id
            )));
        }

        Ok(QuizSession {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            user_id: user_id.to_string(),
            title: quiz.title.clone(),
            questions: quiz.questions.clone(),
            responses: Vec::with_capacity(quiz.questions.len()),
            state: QuizSessionState::Question(0),
            score: None,
            started_at: Utc::now(),
        })
    }

    pub fn state(&self) -> QuizSessionState {
        self.state
    }

    pub fn responses(&self) -> &[QuestionResponse] {
        &self.responses
    }

    pub fn score(&self) -> Option<i32> {
        self.score
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            QuizSessionState::Question(index) => self.questions.get(index),
            QuizSessionState::Results => None,
        }
    }

    /// Grades `selected_answer` against the current question without
    /// changing the session.
    pub fn grade(&self, selected_answer: &str) -> AppResult<PendingAnswer> {
        let QuizSessionState::Question(index) = self.state else {
            return Err(AppError::ValidationError(
                "Quiz session is already complete".to_string(),
            ));
        };
        let question = self.questions.get(index).ok_or_else(|| {
            AppError::InternalError(format!("Question {} is out of range", index))
        })?;

        let response = QuizAttemptService::grade_response(index, question, selected_answer);

        if index + 1 < self.questions.len() {
            return Ok(PendingAnswer::Advance(response));
        }

        let mut responses = self.responses.clone();
        responses.push(response.clone());
        let score = QuizAttemptService::score_responses(&responses, self.questions.len());

        Ok(PendingAnswer::Complete {
            response,
            responses,
            score,
        })
    }

    /// Records a graded answer and moves to the next state.
    pub fn apply(&mut self, pending: PendingAnswer) {
        match pending {
            PendingAnswer::Advance(response) => {
                self.responses.push(response);
                self.state = QuizSessionState::Question(self.responses.len());
            }
            PendingAnswer::Complete {
                response, score, ..
            } => {
                self.responses.push(response);
                self.score = Some(score);
                self.state = QuizSessionState::Results;
            }
        }
    }
}
