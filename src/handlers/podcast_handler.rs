use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    middleware::get_request_id,
    models::dto::request::CreatePodcastRequest,
};

/// Proxies a podcast request to the synthesis API. Every failure, including
/// an unreadable body, is a 500 with an `error` field.
#[post("/generate-podcast")]
pub async fn generate_podcast(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request: CreatePodcastRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::GenerationFailed(format!("Invalid request body: {}", e)))?;

    let response = state
        .podcast_service
        .create_podcast(auth.user_id(), request)
        .await
        .inspect_err(|e| {
            log::error!(
                "Podcast generation failed (request {}): {}",
                get_request_id(&req).unwrap_or_default(),
                e
            )
        })?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/podcasts")]
pub async fn list_podcasts(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let podcasts = state.podcast_service.list(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(podcasts))
}

#[get("/podcasts/{id}")]
pub async fn get_podcast(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let podcast = state.podcast_service.get(&id, auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(podcast))
}
