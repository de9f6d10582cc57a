use std::marker::PhantomData;

use models::tyre;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use super::descriptor::{EntityDescriptor, Fetch, Tyres};
use super::domain::Tyre;
use super::staging::{Inserted, Staging};

/// CRUD over one table, bound to a unit of work.
///
/// Reads go straight to the connection. Writes are only staged; nothing
/// reaches the store until the owning unit of work commits.
pub struct Repository<'u, D: EntityDescriptor> {
    conn: &'u DatabaseConnection,
    staging: &'u mut Staging,
    _descriptor: PhantomData<D>,
}

impl<'u, D: EntityDescriptor> Repository<'u, D> {
    pub(crate) fn new(conn: &'u DatabaseConnection, staging: &'u mut Staging) -> Self {
        Self { conn, staging, _descriptor: PhantomData }
    }

    pub async fn list_all(&self) -> Result<Vec<D::Record>, DbErr> {
        self.list(Fetch::Flat).await
    }

    /// Absence is `Ok(None)`.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<D::Record>, DbErr> {
        self.find(id, Fetch::Flat).await
    }

    pub async fn list(&self, fetch: Fetch) -> Result<Vec<D::Record>, DbErr> {
        let rows = <D::Entity as EntityTrait>::find()
            .order_by_asc(D::key_column())
            .all(self.conn)
            .await?;
        self.hydrate(rows, fetch).await
    }

    pub async fn find(&self, id: i32, fetch: Fetch) -> Result<Option<D::Record>, DbErr> {
        let row = <D::Entity as EntityTrait>::find()
            .filter(D::key_column().eq(id))
            .one(self.conn)
            .await?;
        match row {
            Some(row) => Ok(self.hydrate(vec![row], fetch).await?.pop()),
            None => Ok(None),
        }
    }

    /// Stage an insert; the key is left for the store to assign.
    pub fn add(&mut self, record: &D::Record) -> Inserted<D> {
        let mut active = D::to_active(record);
        active.not_set(D::key_column());
        self.staging.stage_insert::<D>(active)
    }

    /// Stage a full-row replace keyed by the record's id.
    pub fn update(&mut self, record: &D::Record) {
        self.staging.stage_update::<D>(D::to_active(record));
    }

    pub fn delete(&mut self, record: &D::Record) {
        self.staging.stage_delete::<D>(D::key(record), D::to_active(record));
    }

    async fn hydrate(&self, rows: Vec<D::Row>, fetch: Fetch) -> Result<Vec<D::Record>, DbErr> {
        let mut records: Vec<D::Record> = rows.into_iter().map(D::from_row).collect();
        if fetch == Fetch::Graph {
            D::attach_related(self.conn, &mut records).await?;
        }
        Ok(records)
    }
}

impl Repository<'_, Tyres> {
    /// Tyres in stock, parent chain resolved.
    pub async fn list_available(&self) -> Result<Vec<Tyre>, DbErr> {
        let rows = tyre::Entity::find()
            .filter(tyre::Column::Availability.eq(true))
            .order_by_asc(tyre::Column::Id)
            .all(self.conn)
            .await?;
        self.hydrate(rows, Fetch::Graph).await
    }

    /// Exact match on all three dimension columns, parent chain resolved.
    pub async fn find_by_dimensions(&self, width: i32, profile: i32, rim_size: i32) -> Result<Vec<Tyre>, DbErr> {
        let rows = tyre::Entity::find()
            .filter(tyre::Column::DimensionsWidth.eq(width))
            .filter(tyre::Column::DimensionsProfile.eq(profile))
            .filter(tyre::Column::DimensionsRimSize.eq(rim_size))
            .order_by_asc(tyre::Column::Id)
            .all(self.conn)
            .await?;
        self.hydrate(rows, Fetch::Graph).await
    }
}
