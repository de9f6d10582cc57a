use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use common::types::Message;
use serde::Deserialize;
use service::TyreCompany;
use tracing::info;

use crate::{errors::ApiError, state::AppState};

pub const PATH: &str = "/api/tyrecompanies";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DimensionQuery {
    pub width: i32,
    pub profile: i32,
    pub rim_size: i32,
}

#[utoipa::path(
    get, path = "/api/tyrecompanies", tag = "companies",
    responses(
        (status = 200, description = "All companies with their models and tyres", body = [crate::openapi::TyreCompanyDoc]),
        (status = 500, description = "Storage fault", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TyreCompany>>, ApiError> {
    Ok(Json(state.companies.get_all().await?))
}

#[utoipa::path(
    get, path = "/api/tyrecompanies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company", body = crate::openapi::TyreCompanyDoc),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<TyreCompany>, ApiError> {
    Ok(Json(state.companies.get_by_id(id).await?))
}

/// Tyres matching all three dimensions, grouped by company and model.
#[utoipa::path(
    get, path = "/api/tyrecompanies/search", tag = "companies",
    params(DimensionQuery),
    responses(
        (status = 200, description = "Grouped search hits", body = [crate::openapi::TyreCompanyDoc]),
        (status = 500, description = "Storage fault", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<DimensionQuery>,
) -> Result<Json<Vec<TyreCompany>>, ApiError> {
    let grouped = state.tyres.search_by_dimensions(q.width, q.profile, q.rim_size).await?;
    info!(width = q.width, profile = q.profile, rim_size = q.rim_size, companies = grouped.len(), "dimension search");
    Ok(Json(grouped))
}

#[utoipa::path(
    post, path = "/api/tyrecompanies", tag = "companies",
    request_body = crate::openapi::TyreCompanyDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TyreCompanyDoc),
        (status = 500, description = "Storage fault", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(State(state): State<AppState>, Json(body): Json<TyreCompany>) -> Result<impl IntoResponse, ApiError> {
    let created = state.companies.create(body).await?;
    let location = format!("{PATH}/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put, path = "/api/tyrecompanies", tag = "companies",
    request_body = crate::openapi::TyreCompanyDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::TyreCompanyDoc),
        (status = 500, description = "Storage fault or concurrency conflict", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(State(state): State<AppState>, Json(body): Json<TyreCompany>) -> Result<Json<TyreCompany>, ApiError> {
    state.companies.update(&body).await?;
    Ok(Json(body))
}

#[utoipa::path(
    delete, path = "/api/tyrecompanies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, description = "Deleted with its models and tyres", body = crate::openapi::MessageDoc),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Message>, ApiError> {
    state.companies.delete(id).await?;
    Ok(Json(Message::new(format!("Tyre company {id} deleted successfully."))))
}
