use actix_web::{delete, get, http::header, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{request::UploadMaterialQuery, response::DeleteResponse},
    services::material_service::PDF_CONTENT_TYPE,
};

/// Upload body: the raw PDF bytes, named by `?name=`.
#[post("/materials")]
pub async fn upload_material(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<UploadMaterialQuery>,
    body: web::Bytes,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let material = state
        .material_service
        .upload(auth.user_id(), &query.name, content_type, body.to_vec())
        .await
        .inspect_err(|e| {
            log::warn!(
                "Upload rejected (request {}): {}",
                get_request_id(&req).unwrap_or_default(),
                e
            )
        })?;

    Ok(HttpResponse::Created().json(material))
}

#[get("/materials")]
pub async fn list_materials(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let materials = state.material_service.list(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(materials))
}

#[delete("/materials/{id}")]
pub async fn delete_material(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.material_service.delete(&id, auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: format!("Material '{}' deleted", id),
    }))
}

/// Public read of a stored file, used by the synthesis API to fetch PDFs.
#[get("/files/{path:.*}")]
pub async fn get_file(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let data = state.material_service.open_file(&path).await?;
    Ok(HttpResponse::Ok().content_type(PDF_CONTENT_TYPE).body(data))
}
