use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TyreDimensionsDoc { pub width: i32, pub profile: i32, pub rim_size: i32 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TyreDoc {
    /// Assigned by the store; ignored on create
    pub id: i32,
    pub dimensions: TyreDimensionsDoc,
    pub model_id: i32,
    pub price: f64,
    pub discount_percentage: f64,
    pub load_index: i32,
    pub speed_index: String,
    pub availability: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TyreModelDoc {
    pub id: i32,
    pub name: String,
    pub company_id: i32,
    /// Read-only; ignored on write
    pub tyres: Vec<TyreDoc>,
}

#[derive(ToSchema)]
pub struct TyreCompanyDoc {
    pub id: i32,
    pub name: String,
    /// Read-only; ignored on write
    pub models: Vec<TyreModelDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::companies::list,
        crate::routes::companies::get,
        crate::routes::companies::search,
        crate::routes::companies::create,
        crate::routes::companies::update,
        crate::routes::companies::delete,
        crate::routes::tyre_models::list,
        crate::routes::tyre_models::get,
        crate::routes::tyre_models::create,
        crate::routes::tyre_models::update,
        crate::routes::tyre_models::delete,
        crate::routes::tyres::list,
        crate::routes::tyres::available,
        crate::routes::tyres::get,
        crate::routes::tyres::create,
        crate::routes::tyres::update,
        crate::routes::tyres::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            MessageDoc,
            TyreDimensionsDoc,
            TyreDoc,
            TyreModelDoc,
            TyreCompanyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "companies"),
        (name = "models"),
        (name = "tyres")
    )
)]
pub struct ApiDoc;
