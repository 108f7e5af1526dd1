use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::AnswerQuestionRequest,
        response::{DeleteResponse, QuizSessionView},
    },
};

#[post("/quizzes/{id}/sessions")]
pub async fn start_quiz_session(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state
        .quiz_session_service
        .start(&quiz_id, auth.user_id())
        .await?;
    Ok(HttpResponse::Created().json(QuizSessionView::from(&session)))
}

#[get("/quiz-sessions/{id}")]
pub async fn get_quiz_session(
    state: web::Data<AppState>,
    session_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state
        .quiz_session_service
        .get(&session_id, auth.user_id())
        .await?;
    Ok(HttpResponse::Ok().json(QuizSessionView::from(&session)))
}

#[post("/quiz-sessions/{id}/answers")]
pub async fn answer_question(
    state: web::Data<AppState>,
    session_id: web::Path<String>,
    request: web::Json<AnswerQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let session = state
        .quiz_session_service
        .answer(&session_id, auth.user_id(), &request.answer)
        .await?;
    Ok(HttpResponse::Ok().json(QuizSessionView::from(&session)))
}

#[delete("/quiz-sessions/{id}")]
pub async fn discard_quiz_session(
    state: web::Data<AppState>,
    session_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .quiz_session_service
        .discard(&session_id, auth.user_id())
        .await?;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: format!("Quiz session '{}' discarded", session_id),
    }))
}
