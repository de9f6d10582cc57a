//! Create `tyre_company`, the root of the catalog hierarchy.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TyreCompany::Table)
                    .if_not_exists()
                    .col(pk_auto(TyreCompany::Id))
                    .col(string_len(TyreCompany::Name, 128).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TyreCompany::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TyreCompany { Table, Id, Name }
