use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use common::types::Message;
use service::Tyre;

use crate::{errors::ApiError, state::AppState};

pub const PATH: &str = "/api/tyres";

#[utoipa::path(
    get, path = "/api/tyres", tag = "tyres",
    responses((status = 200, description = "All tyres", body = [crate::openapi::TyreDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Tyre>>, ApiError> {
    Ok(Json(state.tyres.get_all().await?))
}

#[utoipa::path(
    get, path = "/api/tyres/available", tag = "tyres",
    responses((status = 200, description = "Tyres in stock", body = [crate::openapi::TyreDoc]))
)]
pub async fn available(State(state): State<AppState>) -> Result<Json<Vec<Tyre>>, ApiError> {
    Ok(Json(state.tyres.list_available().await?))
}

#[utoipa::path(
    get, path = "/api/tyres/{id}", tag = "tyres",
    params(("id" = i32, Path, description = "Tyre id")),
    responses(
        (status = 200, description = "Tyre", body = crate::openapi::TyreDoc),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Tyre>, ApiError> {
    Ok(Json(state.tyres.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/api/tyres", tag = "tyres",
    request_body = crate::openapi::TyreDoc,
    responses((status = 201, description = "Created", body = crate::openapi::TyreDoc))
)]
pub async fn create(State(state): State<AppState>, Json(body): Json<Tyre>) -> Result<impl IntoResponse, ApiError> {
    let created = state.tyres.create(body).await?;
    let location = format!("{PATH}/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put, path = "/api/tyres", tag = "tyres",
    request_body = crate::openapi::TyreDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::TyreDoc))
)]
pub async fn update(State(state): State<AppState>, Json(body): Json<Tyre>) -> Result<Json<Tyre>, ApiError> {
    state.tyres.update(&body).await?;
    Ok(Json(body))
}

#[utoipa::path(
    delete, path = "/api/tyres/{id}", tag = "tyres",
    params(("id" = i32, Path, description = "Tyre id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Message>, ApiError> {
    state.tyres.delete(id).await?;
    Ok(Json(Message::new(format!("Tyre {id} deleted successfully."))))
}
