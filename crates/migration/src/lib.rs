//! Declares the catalog schema: companies, models and tyres with cascading
//! foreign keys. Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250503_000001_create_tyre_company;
mod m20250503_000002_create_tyre_model;
mod m20250503_000003_create_tyre;
mod m20250503_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250503_000001_create_tyre_company::Migration),
            Box::new(m20250503_000002_create_tyre_model::Migration),
            Box::new(m20250503_000003_create_tyre::Migration),
            // Indexes should always be applied last
            Box::new(m20250503_000004_add_indexes::Migration),
        ]
    }
}
