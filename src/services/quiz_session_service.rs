use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        quiz_session::PendingAnswer, QuestionResponse, QuizAttempt, QuizSession, QuizSessionState,
    },
    repositories::{QuizAttemptRepository, QuizRepository},
};

/// Unfinished sessions older than this are dropped on the next `start`.
pub const ABANDONED_SESSION_TTL_HOURS: i64 = 24;

type SessionHandle = Arc<Mutex<QuizSession>>;

struct SessionEntry {
    handle: SessionHandle,
    started_at: DateTime<Utc>,
}

/// Holds in-progress quiz sessions in process memory.
///
/// A session leaves the table when it reaches its results, when it is
/// discarded, or when it is swept as abandoned.
pub struct QuizSessionService {
    quiz_repository: Arc<dyn QuizRepository>,
    attempt_repository: Arc<dyn QuizAttemptRepository>,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl QuizSessionService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn QuizAttemptRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            attempt_repository,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn handle(&self, session_id: &str, user_id: &str) -> AppResult<SessionHandle> {
        let handle = self
            .sessions
            .read()
            .await
            .get(session_id)
            .map(|entry| entry.handle.clone())
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz session '{}' not found", session_id))
            })?;

        if handle.lock().await.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not own this quiz session".to_string(),
            ));
        }
        Ok(handle)
    }

    pub async fn active_session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn sweep_abandoned(sessions: &mut HashMap<String, SessionEntry>, now: DateTime<Utc>) {
        let cutoff = now - Duration::hours(ABANDONED_SESSION_TTL_HOURS);
        let before = sessions.len();
        sessions.retain(|_, entry| entry.started_at > cutoff);
        let swept = before - sessions.len();
        if swept > 0 {
            log::info!("Dropped {} abandoned quiz sessions", swept);
        }
    }

    pub async fn start(&self, quiz_id: &str, user_id: &str) -> AppResult<QuizSession> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        if !quiz.is_owned_by(user_id) {
            return Err(AppError::Forbidden("You do not own this quiz".to_string()));
        }

        let session = QuizSession::start(&quiz, user_id)?;
        {
            let mut sessions = self.sessions.write().await;
            Self::sweep_abandoned(&mut sessions, Utc::now());
            sessions.insert(
                session.id.clone(),
                SessionEntry {
                    handle: Arc::new(Mutex::new(session.clone())),
                    started_at: session.started_at,
                },
            );
        }

        log::info!(
            "Started quiz session {} on quiz {} for user {}",
            session.id,
            quiz_id,
            user_id
        );
        Ok(session)
    }

    pub async fn get(&self, session_id: &str, user_id: &str) -> AppResult<QuizSession> {
        let handle = self.handle(session_id, user_id).await?;
        let session = handle.lock().await.clone();
        Ok(session)
    }

    /// Grades the answer to the current question.
    ///
    /// On the last question the score and the attempt are written before the
    /// session enters its results; if either write fails the session is left
    /// on the last question. A finished session is returned and forgotten.
    pub async fn answer(
        &self,
        session_id: &str,
        user_id: &str,
        answer: &str,
    ) -> AppResult<QuizSession> {
        let handle = self.handle(session_id, user_id).await?;
        let mut session = handle.lock().await;

        let pending = session.grade(answer)?;

        if let PendingAnswer::Complete {
            responses, score, ..
        } = &pending
        {
            self.persist_completion(&session, responses.clone(), *score)
                .await?;
        }

        session.apply(pending);

        if session.state() == QuizSessionState::Results {
            self.sessions.write().await.remove(session_id);
        }
        Ok(session.clone())
    }

    async fn persist_completion(
        &self,
        session: &QuizSession,
        responses: Vec<QuestionResponse>,
        score: i32,
    ) -> AppResult<()> {
        if let Err(e) = self
            .quiz_repository
            .update_score(&session.quiz_id, score)
            .await
        {
            log::error!(
                "Failed to save score for quiz {}: {}",
                session.quiz_id,
                e
            );
            return Err(e);
        }

        let attempt = QuizAttempt::new(&session.quiz_id, &session.user_id, score, responses);
        if let Err(e) = self.attempt_repository.create(attempt).await {
            log::error!(
                "Failed to save attempt for quiz {}: {}",
                session.quiz_id,
                e
            );
            return Err(e);
        }

        log::info!(
            "Quiz session {} completed with score {}",
            session.id,
            score
        );
        Ok(())
    }

    pub async fn discard(&self, session_id: &str, user_id: &str) -> AppResult<()> {
        self.handle(session_id, user_id).await?;
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}
