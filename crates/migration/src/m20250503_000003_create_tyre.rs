//! Create `tyre` with FK to `tyre_model`.
//!
//! The dimension triple is stored inline as three columns; it has no table of its own.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tyre::Table)
                    .if_not_exists()
                    .col(pk_auto(Tyre::Id))
                    .col(integer(Tyre::DimensionsWidth).not_null())
                    .col(integer(Tyre::DimensionsProfile).not_null())
                    .col(integer(Tyre::DimensionsRimSize).not_null())
                    .col(integer(Tyre::ModelId).not_null())
                    .col(decimal_len(Tyre::Price, 16, 2).not_null())
                    .col(double(Tyre::DiscountPercentage).not_null())
                    .col(integer(Tyre::LoadIndex).not_null())
                    .col(string_len(Tyre::SpeedIndex, 8).not_null())
                    .col(boolean(Tyre::Availability).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tyre_model")
                            .from(Tyre::Table, Tyre::ModelId)
                            .to(TyreModel::Table, TyreModel::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tyre::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tyre {
    Table,
    Id,
    DimensionsWidth,
    DimensionsProfile,
    DimensionsRimSize,
    ModelId,
    Price,
    DiscountPercentage,
    LoadIndex,
    SpeedIndex,
    Availability,
}

#[derive(DeriveIden)]
enum TyreModel { Table, Id }
