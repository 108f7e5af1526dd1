use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::response::AssistantRouteResponse,
    services::assistant_service::AssistantEvent,
};

/// Embed id, event declarations and prompt for the voice assistant widget.
#[get("/assistant")]
pub async fn get_assistant_config(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> HttpResponse {
    HttpResponse::Ok().json(state.assistant_service.config())
}

#[post("/assistant/events")]
pub async fn handle_assistant_event(
    state: web::Data<AppState>,
    event: web::Json<AssistantEvent>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let route = state.assistant_service.route(&event)?;
    log::debug!("Assistant event {:?} routed to {}", event.0, route);
    Ok(HttpResponse::Ok().json(AssistantRouteResponse { route }))
}
