use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_tyre_model_company_id")
                    .table(TyreModel::Table)
                    .col(TyreModel::CompanyId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_tyre_model_id")
                    .table(Tyre::Table)
                    .col(Tyre::ModelId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        // dimension search filters on all three columns at once
        manager
            .create_index(
                Index::create()
                    .name("idx_tyre_dimensions")
                    .table(Tyre::Table)
                    .col(Tyre::DimensionsWidth)
                    .col(Tyre::DimensionsProfile)
                    .col(Tyre::DimensionsRimSize)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_tyre_dimensions").table(Tyre::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tyre_model_id").table(Tyre::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tyre_model_company_id").table(TyreModel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TyreModel { Table, CompanyId }

#[derive(DeriveIden)]
enum Tyre { Table, ModelId, DimensionsWidth, DimensionsProfile, DimensionsRimSize }
