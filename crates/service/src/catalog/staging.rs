//! Writes recorded by repositories and flushed by the unit of work.

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, DbErr};

use super::descriptor::EntityDescriptor;

/// Outcome of one staged write.
pub(crate) struct Applied {
    pub rows: u64,
    /// Insert ticket and the key the store assigned to it.
    pub inserted: Option<(usize, i32)>,
}

#[async_trait]
pub(crate) trait PendingWrite: Send + Sync {
    async fn apply(self: Box<Self>, txn: &DatabaseTransaction) -> Result<Applied, DbErr>;
}

/// Handle to a staged insert; resolves to the new key after commit.
pub struct Inserted<D> {
    pub(crate) ticket: usize,
    _descriptor: PhantomData<fn() -> D>,
}

impl<D> Inserted<D> {
    fn new(ticket: usize) -> Self {
        Self { ticket, _descriptor: PhantomData }
    }
}

#[derive(Default)]
pub(crate) struct Staging {
    writes: Vec<Box<dyn PendingWrite>>,
    next_ticket: usize,
    assigned: HashMap<usize, i32>,
}

impl Staging {
    pub(crate) fn stage_insert<D: EntityDescriptor>(&mut self, active: D::ActiveModel) -> Inserted<D> {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.writes.push(Box::new(Insert::<D> { ticket, active }));
        Inserted::new(ticket)
    }

    pub(crate) fn stage_update<D: EntityDescriptor>(&mut self, active: D::ActiveModel) {
        self.writes.push(Box::new(Update::<D> { active }));
    }

    pub(crate) fn stage_delete<D: EntityDescriptor>(&mut self, key: i32, active: D::ActiveModel) {
        self.writes.push(Box::new(Delete::<D> { key, active }));
    }

    pub(crate) fn is_empty(&self) -> bool { self.writes.is_empty() }

    pub(crate) fn len(&self) -> usize { self.writes.len() }

    pub(crate) fn take(&mut self) -> Vec<Box<dyn PendingWrite>> { std::mem::take(&mut self.writes) }

    pub(crate) fn clear(&mut self) { self.writes.clear(); }

    pub(crate) fn record_identity(&mut self, ticket: usize, id: i32) { self.assigned.insert(ticket, id); }

    pub(crate) fn identity(&self, ticket: usize) -> Option<i32> { self.assigned.get(&ticket).copied() }
}

struct Insert<D: EntityDescriptor> {
    ticket: usize,
    active: D::ActiveModel,
}

struct Update<D: EntityDescriptor> {
    active: D::ActiveModel,
}

struct Delete<D: EntityDescriptor> {
    key: i32,
    active: D::ActiveModel,
}

#[async_trait]
impl<D: EntityDescriptor> PendingWrite for Insert<D> {
    async fn apply(self: Box<Self>, txn: &DatabaseTransaction) -> Result<Applied, DbErr> {
        let Insert { ticket, active } = *self;
        let row = active.insert(txn).await?;
        let id = D::key(&D::from_row(row));
        Ok(Applied { rows: 1, inserted: Some((ticket, id)) })
    }
}

#[async_trait]
impl<D: EntityDescriptor> PendingWrite for Update<D> {
    async fn apply(self: Box<Self>, txn: &DatabaseTransaction) -> Result<Applied, DbErr> {
        let Update { active } = *self;
        // Zero matched rows surfaces as `DbErr::RecordNotUpdated`.
        active.update(txn).await?;
        Ok(Applied { rows: 1, inserted: None })
    }
}

#[async_trait]
impl<D: EntityDescriptor> PendingWrite for Delete<D> {
    async fn apply(self: Box<Self>, txn: &DatabaseTransaction) -> Result<Applied, DbErr> {
        let Delete { key, active } = *self;
        let res = active.delete(txn).await?;
        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!("{} {} not found", D::NAME, key)));
        }
        Ok(Applied { rows: res.rows_affected, inserted: None })
    }
}
