use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use common::types::Message;
use service::TyreModel;

use crate::{errors::ApiError, state::AppState};

pub const PATH: &str = "/api/tyremodels";

#[utoipa::path(
    get, path = "/api/tyremodels", tag = "models",
    responses((status = 200, description = "All models with their tyres", body = [crate::openapi::TyreModelDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TyreModel>>, ApiError> {
    Ok(Json(state.models.get_all().await?))
}

#[utoipa::path(
    get, path = "/api/tyremodels/{id}", tag = "models",
    params(("id" = i32, Path, description = "Model id")),
    responses(
        (status = 200, description = "Model", body = crate::openapi::TyreModelDoc),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<TyreModel>, ApiError> {
    Ok(Json(state.models.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/api/tyremodels", tag = "models",
    request_body = crate::openapi::TyreModelDoc,
    responses((status = 201, description = "Created", body = crate::openapi::TyreModelDoc))
)]
pub async fn create(State(state): State<AppState>, Json(body): Json<TyreModel>) -> Result<impl IntoResponse, ApiError> {
    let created = state.models.create(body).await?;
    let location = format!("{PATH}/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put, path = "/api/tyremodels", tag = "models",
    request_body = crate::openapi::TyreModelDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::TyreModelDoc))
)]
pub async fn update(State(state): State<AppState>, Json(body): Json<TyreModel>) -> Result<Json<TyreModel>, ApiError> {
    state.models.update(&body).await?;
    Ok(Json(body))
}

#[utoipa::path(
    delete, path = "/api/tyremodels/{id}", tag = "models",
    params(("id" = i32, Path, description = "Model id")),
    responses(
        (status = 200, description = "Deleted with its tyres", body = crate::openapi::MessageDoc),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Message>, ApiError> {
    state.models.delete(id).await?;
    Ok(Json(Message::new(format!("Tyre model {id} deleted successfully."))))
}
