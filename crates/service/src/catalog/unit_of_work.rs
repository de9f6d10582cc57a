use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use tracing::debug;

use super::descriptor::{Companies, EntityDescriptor, Models, Tyres};
use super::repository::Repository;
use super::staging::{Inserted, Staging};

/// One atomic batch of writes across the catalog tables.
///
/// Repositories handed out here share the connection and the staging
/// buffer. `commit` flushes the buffer inside a single transaction.
pub struct UnitOfWork {
    conn: DatabaseConnection,
    staged: Staging,
}

impl UnitOfWork {
    pub fn new(conn: &DatabaseConnection) -> Self {
        Self { conn: conn.clone(), staged: Staging::default() }
    }

    pub fn repository<D: EntityDescriptor>(&mut self) -> Repository<'_, D> {
        Repository::new(&self.conn, &mut self.staged)
    }

    pub fn companies(&mut self) -> Repository<'_, Companies> { self.repository() }

    pub fn models(&mut self) -> Repository<'_, Models> { self.repository() }

    pub fn tyres(&mut self) -> Repository<'_, Tyres> { self.repository() }

    pub fn has_changes(&self) -> bool { !self.staged.is_empty() }

    /// Drop every staged write without touching the store.
    pub fn discard(&mut self) { self.staged.clear(); }

    /// Key assigned to a committed insert; `None` before a successful commit.
    pub fn identity_of<D: EntityDescriptor>(&self, inserted: &Inserted<D>) -> Option<i32> {
        self.staged.identity(inserted.ticket)
    }

    /// Apply staged writes in order inside one transaction and return the
    /// number of affected rows.
    ///
    /// The batch is consumed whether or not it lands. On error the
    /// transaction is dropped unfinished, which rolls it back.
    pub async fn commit(&mut self) -> Result<u64, DbErr> {
        if self.staged.is_empty() {
            return Ok(0);
        }
        debug!(writes = self.staged.len(), "committing unit of work");
        let writes = self.staged.take();
        let txn = self.conn.begin().await?;
        let mut rows = 0;
        let mut assigned = Vec::new();
        for write in writes {
            let applied = write.apply(&txn).await?;
            rows += applied.rows;
            assigned.extend(applied.inserted);
        }
        txn.commit().await?;
        for (ticket, id) in assigned {
            self.staged.record_identity(ticket, id);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, sample_tyre};
    use crate::{TyreCompany, TyreModel};

    #[tokio::test]
    async fn commit_with_nothing_staged_is_a_no_op() -> anyhow::Result<()> {
        let db = get_db().await?;
        let mut uow = UnitOfWork::new(&db);
        assert!(!uow.has_changes());
        assert_eq!(uow.commit().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn commit_assigns_identities_in_staging_order() -> anyhow::Result<()> {
        let db = get_db().await?;
        let mut uow = UnitOfWork::new(&db);
        let first = uow.companies().add(&TyreCompany::new("Bridgestone"));
        let second = uow.companies().add(&TyreCompany::new("Continental"));
        assert!(uow.identity_of(&first).is_none());

        assert_eq!(uow.commit().await?, 2);
        assert!(!uow.has_changes());
        let (a, b) = (uow.identity_of(&first).expect("first id"), uow.identity_of(&second).expect("second id"));
        assert!(a < b);

        let stored = uow.companies().get_by_id(b).await?.expect("stored");
        assert_eq!(stored.name, "Continental");
        Ok(())
    }

    #[tokio::test]
    async fn dependent_writes_land_in_one_batch() -> anyhow::Result<()> {
        let db = get_db().await?;
        let mut uow = UnitOfWork::new(&db);
        let company = uow.companies().add(&TyreCompany::new("Goodyear"));
        uow.commit().await?;
        let company_id = uow.identity_of(&company).expect("company id");

        let model = uow.models().add(&TyreModel::new(company_id, "Eagle F1"));
        uow.commit().await?;
        let model_id = uow.identity_of(&model).expect("model id");

        uow.tyres().add(&sample_tyre(model_id, 245, 40, 18, true));
        uow.tyres().add(&sample_tyre(model_id, 255, 35, 19, false));
        assert_eq!(uow.commit().await?, 2);
        assert_eq!(uow.tyres().list_all().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn failing_write_rolls_back_the_whole_batch() -> anyhow::Result<()> {
        let db = get_db().await?;
        let mut uow = UnitOfWork::new(&db);
        uow.companies().add(&TyreCompany::new("Hankook"));
        // No company 4242: the foreign key rejects this row.
        uow.models().add(&TyreModel::new(4242, "Ventus"));

        assert!(uow.commit().await.is_err());
        assert!(!uow.has_changes());
        assert!(uow.companies().list_all().await?.is_empty());
        assert!(uow.models().list_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn discard_drops_staged_writes() -> anyhow::Result<()> {
        let db = get_db().await?;
        let mut uow = UnitOfWork::new(&db);
        uow.companies().add(&TyreCompany::new("Nokian"));
        uow.discard();
        assert!(!uow.has_changes());
        assert_eq!(uow.commit().await?, 0);
        assert!(uow.companies().list_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_rows_fail() -> anyhow::Result<()> {
        let db = get_db().await?;
        let mut uow = UnitOfWork::new(&db);
        let mut ghost = TyreCompany::new("Ghost");
        ghost.id = 777;

        uow.companies().update(&ghost);
        let err = uow.commit().await.expect_err("update of missing row");
        assert!(crate::errors::is_concurrency_conflict(&err));

        uow.companies().delete(&ghost);
        let err = uow.commit().await.expect_err("delete of missing row");
        assert!(matches!(err, DbErr::RecordNotFound(_)));
        Ok(())
    }
}
