use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizAttempt},
        dto::request::GenerateQuizRequest,
    },
    repositories::{QuizAttemptRepository, QuizRepository},
    services::model_service::DocumentModel,
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    attempt_repository: Arc<dyn QuizAttemptRepository>,
    model: Arc<dyn DocumentModel>,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn QuizAttemptRepository>,
        model: Arc<dyn DocumentModel>,
    ) -> Self {
        Self {
            repository,
            attempt_repository,
            model,
        }
    }

    /// Loads a quiz the caller owns.
    pub async fn get_quiz(&self, id: &str, user_id: &str) -> AppResult<Quiz> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        if !quiz.is_owned_by(user_id) {
            return Err(AppError::Forbidden("You do not own this quiz".to_string()));
        }
        Ok(quiz)
    }

    pub async fn list_quizzes(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn list_attempts(&self, quiz_id: &str, user_id: &str) -> AppResult<Vec<QuizAttempt>> {
        self.get_quiz(quiz_id, user_id).await?;
        self.attempt_repository
            .find_by_user_and_quiz(user_id, quiz_id)
            .await
    }

    /// Asks the document model for a quiz about the first file and stores it.
    pub async fn generate_quiz(
        &self,
        user_id: &str,
        request: GenerateQuizRequest,
    ) -> AppResult<Quiz> {
        request.validate()?;

        let file = request
            .files
            .first()
            .filter(|f| f.has_data())
            .ok_or_else(|| AppError::ValidationError("No file data provided".to_string()))?;

        let generated = self
            .model
            .generate_quiz(file, request.question_count())
            .await?;

        let title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| generated.title.trim().to_string());
        let questions = generated.into_questions()?;

        let quiz = Quiz::new(user_id, &title, questions);
        let quiz = self.repository.create(quiz).await?;

        log::info!(
            "Generated quiz {} with {} questions for user {}",
            quiz.id,
            quiz.question_count(),
            user_id
        );
        Ok(quiz)
    }
}
