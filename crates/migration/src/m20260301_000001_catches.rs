use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Catches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Catches::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Catches::Species).string().not_null())
                    .col(ColumnDef::new(Catches::Location).string().not_null())
                    .col(ColumnDef::new(Catches::Latitude).double())
                    .col(ColumnDef::new(Catches::Longitude).double())
                    .col(ColumnDef::new(Catches::CaughtAt).string().not_null())
                    .col(ColumnDef::new(Catches::Notes).string())
                    .col(ColumnDef::new(Catches::Weight).double())
                    .col(ColumnDef::new(Catches::Length).double())
                    .col(ColumnDef::new(Catches::ImageUrl).string())
                    .col(ColumnDef::new(Catches::WeatherData).text())
                    .col(ColumnDef::new(Catches::InsertedAt).string().not_null())
                    .col(ColumnDef::new(Catches::UpdatedAt).string().not_null())
                    .col(ColumnDef::new(Catches::CachedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-catches-caught_at")
                    .table(Catches::Table)
                    .col(Catches::CaughtAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Catches::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Catches {
    Table,
    Id,
    Species,
    Location,
    Latitude,
    Longitude,
    CaughtAt,
    Notes,
    Weight,
    Length,
    ImageUrl,
    WeatherData,
    InsertedAt,
    UpdatedAt,
    CachedAt,
}
