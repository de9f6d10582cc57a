use sea_orm::DatabaseConnection;
use service::{CompanyService, ModelService, TyreService};

/// Shared handler state; each service is a cheap handle over the pool.
#[derive(Clone)]
pub struct AppState {
    pub companies: CompanyService,
    pub models: ModelService,
    pub tyres: TyreService,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            companies: CompanyService::new(db.clone()),
            models: ModelService::new(db.clone()),
            tyres: TyreService::new(db),
        }
    }
}
