use axum::{routing::get, Json, Router};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::{openapi::ApiDoc, state::AppState};

pub mod companies;
pub mod tyre_models;
pub mod tyres;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let companies = Router::new()
        .route(companies::PATH, get(companies::list).post(companies::create).put(companies::update))
        .route("/api/tyrecompanies/search", get(companies::search))
        .route("/api/tyrecompanies/:id", get(companies::get).delete(companies::delete));

    let models = Router::new()
        .route(tyre_models::PATH, get(tyre_models::list).post(tyre_models::create).put(tyre_models::update))
        .route("/api/tyremodels/:id", get(tyre_models::get).delete(tyre_models::delete));

    let tyres = Router::new()
        .route(tyres::PATH, get(tyres::list).post(tyres::create).put(tyres::update))
        .route("/api/tyres/available", get(tyres::available))
        .route("/api/tyres/:id", get(tyres::get).delete(tyres::delete));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(companies)
        .merge(models)
        .merge(tyres)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses and I/O failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use migration::MigratorTrait;
    use sea_orm::{ConnectOptions, Database};
    use tower::ServiceExt;

    async fn app() -> anyhow::Result<Router> {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await?;
        migration::Migrator::up(&db, None).await?;
        Ok(build_router(AppState::new(db), CorsLayer::permissive()))
    }

    async fn body_json(res: axum::response::Response) -> anyhow::Result<serde_json::Value> {
        let bytes = to_bytes(res.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    #[tokio::test]
    async fn health_is_ok() -> anyhow::Result<()> {
        let res = app().await?.oneshot(Request::get("/health").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await?["status"], "ok");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_company_is_404_with_error_body() -> anyhow::Result<()> {
        let res = app().await?.oneshot(Request::get("/api/tyrecompanies/41").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await?["error"], "TyreCompany 41 not found.");
        Ok(())
    }

    #[tokio::test]
    async fn search_literal_segment_wins_over_id() -> anyhow::Result<()> {
        let uri = "/api/tyrecompanies/search?width=205&profile=55&rimSize=16";
        let res = app().await?.oneshot(Request::get(uri).body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await?, serde_json::json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn openapi_document_lists_catalog_paths() -> anyhow::Result<()> {
        let res = app().await?.oneshot(Request::get("/api-docs/openapi.json").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        let doc = body_json(res).await?;
        assert!(doc["paths"].get("/api/tyrecompanies/search").is_some());
        assert!(doc["paths"].get("/api/tyres/{id}").is_some());
        Ok(())
    }
}
