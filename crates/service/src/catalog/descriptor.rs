//! Per-entity capabilities the generic repository is parameterised by.

use std::collections::HashMap;

use async_trait::async_trait;
use models::{tyre, tyre_company, tyre_model};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use super::domain::{CompanyRef, ModelRef, Tyre, TyreCompany, TyreDimensions, TyreModel};

/// Whether a read resolves the descriptor's join graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fetch {
    #[default]
    Flat,
    Graph,
}

/// Everything a repository needs to know about one table.
#[async_trait]
pub trait EntityDescriptor: Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Row>;
    type Row: IntoActiveModel<Self::ActiveModel> + Send + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync + 'static;
    type Record: Clone + Send + Sync + 'static;

    /// Type name used in not-found messages.
    const NAME: &'static str;
    const LABEL: &'static str;
    const PLURAL: &'static str;
    /// Read policy of the service built over this descriptor.
    const DEFAULT_FETCH: Fetch;

    fn key_column() -> <Self::Entity as EntityTrait>::Column;
    fn key(record: &Self::Record) -> i32;
    fn set_key(record: &mut Self::Record, id: i32);
    fn from_row(row: Self::Row) -> Self::Record;
    /// Every column set, key included.
    fn to_active(record: &Self::Record) -> Self::ActiveModel;

    /// Resolve the join graph for `records` in a fixed number of queries.
    async fn attach_related(conn: &DatabaseConnection, records: &mut [Self::Record]) -> Result<(), DbErr>;
}

pub struct Companies;
pub struct Models;
pub struct Tyres;

#[async_trait]
impl EntityDescriptor for Companies {
    type Entity = tyre_company::Entity;
    type Row = tyre_company::Model;
    type ActiveModel = tyre_company::ActiveModel;
    type Record = TyreCompany;

    const NAME: &'static str = "TyreCompany";
    const LABEL: &'static str = "tyre company";
    const PLURAL: &'static str = "tyre companies";
    const DEFAULT_FETCH: Fetch = Fetch::Graph;

    fn key_column() -> tyre_company::Column { tyre_company::Column::Id }

    fn key(record: &TyreCompany) -> i32 { record.id }

    fn set_key(record: &mut TyreCompany, id: i32) { record.id = id; }

    fn from_row(row: tyre_company::Model) -> TyreCompany {
        TyreCompany { id: row.id, name: row.name, models: Vec::new() }
    }

    fn to_active(record: &TyreCompany) -> tyre_company::ActiveModel {
        tyre_company::ActiveModel { id: Set(record.id), name: Set(record.name.clone()) }
    }

    async fn attach_related(conn: &DatabaseConnection, records: &mut [TyreCompany]) -> Result<(), DbErr> {
        let ids = distinct(records.iter().map(|c| c.id));
        let mut models = models_by_company(conn, &ids).await?;
        for company in records.iter_mut() {
            company.models = models.remove(&company.id).unwrap_or_default();
        }
        Ok(())
    }
}

#[async_trait]
impl EntityDescriptor for Models {
    type Entity = tyre_model::Entity;
    type Row = tyre_model::Model;
    type ActiveModel = tyre_model::ActiveModel;
    type Record = TyreModel;

    const NAME: &'static str = "TyreModel";
    const LABEL: &'static str = "tyre model";
    const PLURAL: &'static str = "tyre models";
    const DEFAULT_FETCH: Fetch = Fetch::Graph;

    fn key_column() -> tyre_model::Column { tyre_model::Column::Id }

    fn key(record: &TyreModel) -> i32 { record.id }

    fn set_key(record: &mut TyreModel, id: i32) { record.id = id; }

    fn from_row(row: tyre_model::Model) -> TyreModel {
        TyreModel { id: row.id, name: row.name, company_id: row.company_id, company: None, tyres: Vec::new() }
    }

    fn to_active(record: &TyreModel) -> tyre_model::ActiveModel {
        tyre_model::ActiveModel {
            id: Set(record.id),
            name: Set(record.name.clone()),
            company_id: Set(record.company_id),
        }
    }

    async fn attach_related(conn: &DatabaseConnection, records: &mut [TyreModel]) -> Result<(), DbErr> {
        let model_ids = distinct(records.iter().map(|m| m.id));
        let company_ids = distinct(records.iter().map(|m| m.company_id));
        let mut tyres = tyres_by_model(conn, &model_ids).await?;
        let companies = company_refs(conn, &company_ids).await?;
        for model in records.iter_mut() {
            model.tyres = tyres.remove(&model.id).unwrap_or_default();
            model.company = companies.get(&model.company_id).cloned();
        }
        Ok(())
    }
}

#[async_trait]
impl EntityDescriptor for Tyres {
    type Entity = tyre::Entity;
    type Row = tyre::Model;
    type ActiveModel = tyre::ActiveModel;
    type Record = Tyre;

    const NAME: &'static str = "Tyre";
    const LABEL: &'static str = "tyre";
    const PLURAL: &'static str = "tyres";
    const DEFAULT_FETCH: Fetch = Fetch::Flat;

    fn key_column() -> tyre::Column { tyre::Column::Id }

    fn key(record: &Tyre) -> i32 { record.id }

    fn set_key(record: &mut Tyre, id: i32) { record.id = id; }

    fn from_row(row: tyre::Model) -> Tyre {
        Tyre {
            id: row.id,
            dimensions: TyreDimensions::new(row.dimensions_width, row.dimensions_profile, row.dimensions_rim_size),
            model_id: row.model_id,
            model: None,
            price: row.price,
            discount_percentage: row.discount_percentage,
            load_index: row.load_index,
            speed_index: row.speed_index,
            availability: row.availability,
        }
    }

    fn to_active(record: &Tyre) -> tyre::ActiveModel {
        tyre::ActiveModel {
            id: Set(record.id),
            dimensions_width: Set(record.dimensions.width),
            dimensions_profile: Set(record.dimensions.profile),
            dimensions_rim_size: Set(record.dimensions.rim_size),
            model_id: Set(record.model_id),
            price: Set(record.price),
            discount_percentage: Set(record.discount_percentage),
            load_index: Set(record.load_index),
            speed_index: Set(record.speed_index.clone()),
            availability: Set(record.availability),
        }
    }

    /// Parent chain: tyre -> model -> company.
    async fn attach_related(conn: &DatabaseConnection, records: &mut [Tyre]) -> Result<(), DbErr> {
        let model_ids = distinct(records.iter().map(|t| t.model_id));
        if model_ids.is_empty() {
            return Ok(());
        }
        let models = tyre_model::Entity::find()
            .filter(tyre_model::Column::Id.is_in(model_ids))
            .all(conn)
            .await?;
        let companies = company_refs(conn, &distinct(models.iter().map(|m| m.company_id))).await?;
        let parents: HashMap<i32, ModelRef> = models
            .into_iter()
            .map(|m| {
                let company = companies.get(&m.company_id).cloned();
                (m.id, ModelRef { id: m.id, name: m.name, company_id: m.company_id, company })
            })
            .collect();
        for tyre in records.iter_mut() {
            tyre.model = parents.get(&tyre.model_id).cloned();
        }
        Ok(())
    }
}

fn distinct(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

async fn tyres_by_model(conn: &DatabaseConnection, model_ids: &[i32]) -> Result<HashMap<i32, Vec<Tyre>>, DbErr> {
    let mut grouped: HashMap<i32, Vec<Tyre>> = HashMap::new();
    if model_ids.is_empty() {
        return Ok(grouped);
    }
    let rows = tyre::Entity::find()
        .filter(tyre::Column::ModelId.is_in(model_ids.iter().copied()))
        .order_by_asc(tyre::Column::Id)
        .all(conn)
        .await?;
    for row in rows {
        grouped.entry(row.model_id).or_default().push(Tyres::from_row(row));
    }
    Ok(grouped)
}

async fn models_by_company(
    conn: &DatabaseConnection,
    company_ids: &[i32],
) -> Result<HashMap<i32, Vec<TyreModel>>, DbErr> {
    let mut grouped: HashMap<i32, Vec<TyreModel>> = HashMap::new();
    if company_ids.is_empty() {
        return Ok(grouped);
    }
    let rows = tyre_model::Entity::find()
        .filter(tyre_model::Column::CompanyId.is_in(company_ids.iter().copied()))
        .order_by_asc(tyre_model::Column::Id)
        .all(conn)
        .await?;
    let model_ids = distinct(rows.iter().map(|m| m.id));
    let mut tyres = tyres_by_model(conn, &model_ids).await?;
    for row in rows {
        let mut model = Models::from_row(row);
        model.tyres = tyres.remove(&model.id).unwrap_or_default();
        grouped.entry(model.company_id).or_default().push(model);
    }
    Ok(grouped)
}

async fn company_refs(conn: &DatabaseConnection, company_ids: &[i32]) -> Result<HashMap<i32, CompanyRef>, DbErr> {
    if company_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = tyre_company::Entity::find()
        .filter(tyre_company::Column::Id.is_in(company_ids.iter().copied()))
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|c| (c.id, CompanyRef { id: c.id, name: c.name })).collect())
}
