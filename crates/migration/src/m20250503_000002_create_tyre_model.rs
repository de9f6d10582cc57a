//! Create `tyre_model` with FK to `tyre_company`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TyreModel::Table)
                    .if_not_exists()
                    .col(pk_auto(TyreModel::Id))
                    .col(string_len(TyreModel::Name, 128).not_null())
                    .col(integer(TyreModel::CompanyId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tyre_model_company")
                            .from(TyreModel::Table, TyreModel::CompanyId)
                            .to(TyreCompany::Table, TyreCompany::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TyreModel::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TyreModel { Table, Id, Name, CompanyId }

#[derive(DeriveIden)]
enum TyreCompany { Table, Id }
