use actix_web::{post, web, HttpResponse};
use futures::StreamExt;

use crate::{
    app_state::AppState, auth::AuthenticatedUser, errors::AppError,
    models::dto::request::GenerateSummaryRequest,
};

/// Streams a markdown summary of the first inline file as plain text.
#[post("/generate-summary")]
pub async fn generate_summary(
    state: web::Data<AppState>,
    body: web::Bytes,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request: GenerateSummaryRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::GenerationFailed(format!("Invalid request body: {}", e)))?;

    let file = request
        .first_file()
        .ok_or_else(|| AppError::GenerationFailed("No file data provided".to_string()))?;

    let stream = state.model.stream_summary(file).await?;
    let body = stream.map(|chunk| chunk.map(web::Bytes::from));

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .streaming(body))
}
