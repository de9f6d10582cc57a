use std::marker::PhantomData;

use sea_orm::{DatabaseConnection, DbErr};
use tracing::{info, instrument};

use crate::errors::ServiceError;

use super::descriptor::{Companies, EntityDescriptor, Fetch, Models, Tyres};
use super::domain::{Tyre, TyreCompany};
use super::grouping::group_by_company;
use super::unit_of_work::UnitOfWork;

/// CRUD entry point for one entity type.
///
/// Every call runs in its own unit of work. Store faults are wrapped into
/// [`ServiceError`] here and nowhere else.
pub struct EntityService<D: EntityDescriptor> {
    db: DatabaseConnection,
    fetch: Fetch,
    _descriptor: PhantomData<fn() -> D>,
}

pub type CompanyService = EntityService<Companies>;
pub type ModelService = EntityService<Models>;
pub type TyreService = EntityService<Tyres>;

impl<D: EntityDescriptor> Clone for EntityService<D> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), fetch: self.fetch, _descriptor: PhantomData }
    }
}

impl<D: EntityDescriptor> EntityService<D> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, fetch: D::DEFAULT_FETCH, _descriptor: PhantomData }
    }

    pub fn with_fetch(mut self, fetch: Fetch) -> Self {
        self.fetch = fetch;
        self
    }

    #[instrument(skip(self), fields(entity = D::NAME))]
    pub async fn get_all(&self) -> Result<Vec<D::Record>, ServiceError> {
        let mut uow = UnitOfWork::new(&self.db);
        uow.repository::<D>()
            .list(self.fetch)
            .await
            .map_err(|e| ServiceError::storage(format!("Could not retrieve {}.", D::PLURAL), e))
    }

    #[instrument(skip(self), fields(entity = D::NAME))]
    pub async fn get_by_id(&self, id: i32) -> Result<D::Record, ServiceError> {
        let mut uow = UnitOfWork::new(&self.db);
        match uow.repository::<D>().find(id, self.fetch).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(ServiceError::not_found(D::NAME, id)),
            Err(e) => Err(ServiceError::storage(format!("Could not retrieve {} {}.", D::LABEL, id), e)),
        }
    }

    /// Insert `record` and hand it back with the store-assigned id.
    #[instrument(skip_all, fields(entity = D::NAME))]
    pub async fn create(&self, mut record: D::Record) -> Result<D::Record, ServiceError> {
        let message = || format!("Could not create {}.", D::LABEL);
        let mut uow = UnitOfWork::new(&self.db);
        let inserted = uow.repository::<D>().add(&record);
        uow.commit().await.map_err(|e| ServiceError::storage(message(), e))?;
        let id = uow
            .identity_of(&inserted)
            .ok_or_else(|| ServiceError::storage(message(), DbErr::Custom("store returned no identity".into())))?;
        D::set_key(&mut record, id);
        info!(id, "{} created", D::LABEL);
        Ok(record)
    }

    /// Whole-row replace. Zero matched rows means the row changed or
    /// vanished underneath us and is reported as a concurrency conflict.
    #[instrument(skip_all, fields(entity = D::NAME, id = D::key(record)))]
    pub async fn update(&self, record: &D::Record) -> Result<(), ServiceError> {
        let id = D::key(record);
        let mut uow = UnitOfWork::new(&self.db);
        uow.repository::<D>().update(record);
        uow.commit()
            .await
            .map_err(|e| ServiceError::from_update(format!("Could not update {} {}.", D::LABEL, id), e))?;
        info!(id, "{} updated", D::LABEL);
        Ok(())
    }

    #[instrument(skip(self), fields(entity = D::NAME))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let message = || format!("Could not delete {} {}.", D::LABEL, id);
        let mut uow = UnitOfWork::new(&self.db);
        let existing = uow
            .repository::<D>()
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::storage(message(), e))?
            .ok_or_else(|| ServiceError::not_found(D::NAME, id))?;
        uow.repository::<D>().delete(&existing);
        uow.commit().await.map_err(|e| ServiceError::storage(message(), e))?;
        info!(id, "{} deleted", D::LABEL);
        Ok(())
    }
}

impl EntityService<Tyres> {
    /// Flat search hits with their model and company attached.
    #[instrument(skip(self))]
    pub async fn find_by_dimensions(&self, width: i32, profile: i32, rim_size: i32) -> Result<Vec<Tyre>, ServiceError> {
        let mut uow = UnitOfWork::new(&self.db);
        uow.tyres().find_by_dimensions(width, profile, rim_size).await.map_err(|e| {
            ServiceError::storage(
                format!("Could not retrieve tyres with dimensions {width}/{profile} R{rim_size}."),
                e,
            )
        })
    }

    /// Search hits regrouped by company and model.
    #[instrument(skip(self))]
    pub async fn search_by_dimensions(
        &self,
        width: i32,
        profile: i32,
        rim_size: i32,
    ) -> Result<Vec<TyreCompany>, ServiceError> {
        let hits = self.find_by_dimensions(width, profile, rim_size).await?;
        group_by_company(hits)
    }

    #[instrument(skip(self))]
    pub async fn list_available(&self) -> Result<Vec<Tyre>, ServiceError> {
        let mut uow = UnitOfWork::new(&self.db);
        uow.tyres()
            .list_available()
            .await
            .map_err(|e| ServiceError::storage("Could not retrieve available tyres.", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, sample_tyre, seed_catalog};
    use crate::{TyreCompany, TyreModel};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn create_assigns_id_and_ignores_client_id() -> anyhow::Result<()> {
        let db = get_db().await?;
        let companies = CompanyService::new(db.clone());

        let mut draft = TyreCompany::new("Acme");
        draft.id = 500;
        let created = companies.create(draft).await?;
        assert!(created.id > 0);
        assert_ne!(created.id, 500);
        assert_eq!(created.name, "Acme");

        let fetched = companies.get_by_id(created.id).await?;
        assert_eq!(fetched, created);
        assert!(fetched.models.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn nested_collections_are_not_written() -> anyhow::Result<()> {
        let db = get_db().await?;
        let companies = CompanyService::new(db.clone());
        let mut draft = TyreCompany::new("Pirelli");
        draft.models.push(TyreModel::new(0, "Cinturato"));

        let created = companies.create(draft).await?;
        assert!(companies.get_by_id(created.id).await?.models.is_empty());
        assert!(ModelService::new(db).get_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn eager_policy_per_entity() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seeded = seed_catalog(&db).await?;

        let companies = CompanyService::new(db.clone()).get_all().await?;
        let michelin = companies.iter().find(|c| c.id == seeded.michelin).expect("michelin");
        assert_eq!(michelin.models.len(), 2);
        assert!(michelin.models.iter().all(|m| !m.tyres.is_empty()));

        let model = ModelService::new(db.clone()).get_by_id(seeded.sport_model).await?;
        assert_eq!(model.tyres.len(), 2);

        let tyre = TyreService::new(db.clone()).get_by_id(seeded.sport_tyre).await?;
        assert!(tyre.model.is_none());

        let flat = CompanyService::new(db).with_fetch(Fetch::Flat).get_by_id(seeded.michelin).await?;
        assert!(flat.models.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let tyres = TyreService::new(db.clone());

        let err = tyres.get_by_id(404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Tyre", id: 404 }));
        assert_eq!(err.to_string(), "Tyre 404 not found.");

        let companies = CompanyService::new(db);
        companies.create(TyreCompany::new("Kept")).await?;
        let err = companies.delete(404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "TyreCompany", id: 404 }));
        assert_eq!(companies.get_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_the_whole_row() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seeded = seed_catalog(&db).await?;
        let tyres = TyreService::new(db);

        let mut tyre = tyres.get_by_id(seeded.sport_tyre).await?;
        tyre.price = Decimal::new(9950, 2);
        tyre.availability = false;
        tyre.speed_index = "Y".into();
        tyres.update(&tyre).await?;

        let stored = tyres.get_by_id(seeded.sport_tyre).await?;
        assert_eq!(stored, tyre);
        Ok(())
    }

    #[tokio::test]
    async fn update_of_vanished_row_is_a_concurrency_fault() -> anyhow::Result<()> {
        let db = get_db().await?;
        let companies = CompanyService::new(db);
        let created = companies.create(TyreCompany::new("Kumho")).await?;
        companies.delete(created.id).await?;

        let err = companies.update(&created).await.unwrap_err();
        assert!(matches!(err, ServiceError::Concurrency { .. }));
        assert!(err.is_storage_fault());
        Ok(())
    }

    #[tokio::test]
    async fn prices_keep_their_cents() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seeded = seed_catalog(&db).await?;
        let tyres = TyreService::new(db);

        for price in [Decimal::new(8999, 2), Decimal::new(10, 2)] {
            let mut draft = sample_tyre(seeded.sport_model, 255, 40, 18, true);
            draft.price = price;
            let created = tyres.create(draft).await?;
            assert_eq!(tyres.get_by_id(created.id).await?.price, price);
        }
        Ok(())
    }

    #[tokio::test]
    async fn update_with_dangling_parent_is_a_storage_fault() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seeded = seed_catalog(&db).await?;
        let models = ModelService::new(db);

        let mut model = models.get_by_id(seeded.sport_model).await?;
        model.company_id = 31_337;
        let err = models.update(&model).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_to_descendants() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seeded = seed_catalog(&db).await?;

        CompanyService::new(db.clone()).delete(seeded.michelin).await?;

        let models = ModelService::new(db.clone());
        assert!(models.get_all().await?.iter().all(|m| m.company_id != seeded.michelin));
        let err = models.get_by_id(seeded.sport_model).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "TyreModel", .. }));
        let err = TyreService::new(db).get_by_id(seeded.sport_tyre).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn search_groups_hits_by_company_then_model() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seeded = seed_catalog(&db).await?;
        let tyres = TyreService::new(db);

        let flat = tyres.find_by_dimensions(205, 55, 16).await?;
        assert_eq!(flat.len(), 3);

        let grouped = tyres.search_by_dimensions(205, 55, 16).await?;
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].id, seeded.michelin);
        assert_eq!(grouped[0].models.len(), 2);
        assert_eq!(grouped[1].models.len(), 1);
        let total: usize = grouped.iter().flat_map(|c| &c.models).map(|m| m.tyres.len()).sum();
        assert_eq!(total, 3);

        assert!(tyres.search_by_dimensions(100, 10, 10).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn available_tyres_only() -> anyhow::Result<()> {
        let db = get_db().await?;
        let seeded = seed_catalog(&db).await?;
        let tyres = TyreService::new(db);

        let created = tyres.create(sample_tyre(seeded.sport_model, 185, 60, 15, false)).await?;
        let available = tyres.list_available().await?;
        assert!(!available.is_empty());
        assert!(available.iter().all(|t| t.availability && t.id != created.id));
        Ok(())
    }
}
