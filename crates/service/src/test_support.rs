#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use models::{tyre, tyre_company, tyre_model};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::{Tyre, TyreDimensions};

/// Fresh in-memory database with the catalog schema applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // One connection: every pooled connection would otherwise open its own empty database
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Keys of the rows inserted by [`seed_catalog`].
pub struct Seeded {
    pub michelin: i32,
    pub pirelli: i32,
    pub sport_model: i32,
    pub sport_tyre: i32,
    pub out_of_stock_tyre: i32,
}

/// Two companies, three models, five tyres; three of them are 205/55 R16.
pub async fn seed_catalog(db: &DatabaseConnection) -> Result<Seeded, anyhow::Error> {
    let michelin = company(db, "Michelin").await?;
    let pirelli = company(db, "Pirelli").await?;
    let sport_model = model(db, michelin, "Pilot Sport").await?;
    let primacy = model(db, michelin, "Primacy").await?;
    let cinturato = model(db, pirelli, "Cinturato").await?;

    let sport_tyre = insert_tyre(db, sample_tyre(sport_model, 205, 55, 16, true)).await?;
    insert_tyre(db, sample_tyre(sport_model, 225, 45, 17, true)).await?;
    insert_tyre(db, sample_tyre(primacy, 205, 55, 16, true)).await?;
    let out_of_stock_tyre = insert_tyre(db, sample_tyre(primacy, 195, 65, 15, false)).await?;
    insert_tyre(db, sample_tyre(cinturato, 205, 55, 16, true)).await?;

    Ok(Seeded { michelin, pirelli, sport_model, sport_tyre, out_of_stock_tyre })
}

pub fn sample_tyre(model_id: i32, width: i32, profile: i32, rim_size: i32, availability: bool) -> Tyre {
    Tyre {
        id: 0,
        dimensions: TyreDimensions::new(width, profile, rim_size),
        model_id,
        model: None,
        price: Decimal::new(12025, 2),
        discount_percentage: 5.0,
        load_index: 91,
        speed_index: "V".into(),
        availability,
    }
}

async fn company(db: &DatabaseConnection, name: &str) -> Result<i32, anyhow::Error> {
    let row = tyre_company::ActiveModel { name: Set(name.to_owned()), ..Default::default() }
        .insert(db)
        .await?;
    Ok(row.id)
}

async fn model(db: &DatabaseConnection, company_id: i32, name: &str) -> Result<i32, anyhow::Error> {
    let row = tyre_model::ActiveModel { name: Set(name.to_owned()), company_id: Set(company_id), ..Default::default() }
        .insert(db)
        .await?;
    Ok(row.id)
}

async fn insert_tyre(db: &DatabaseConnection, t: Tyre) -> Result<i32, anyhow::Error> {
    let row = tyre::ActiveModel {
        dimensions_width: Set(t.dimensions.width),
        dimensions_profile: Set(t.dimensions.profile),
        dimensions_rim_size: Set(t.dimensions.rim_size),
        model_id: Set(t.model_id),
        price: Set(t.price),
        discount_percentage: Set(t.discount_percentage),
        load_index: Set(t.load_index),
        speed_index: Set(t.speed_index),
        availability: Set(t.availability),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(row.id)
}
