use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_artists_table::Artists;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Arts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Arts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Arts::ArtName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Arts::ArtCategory)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Arts::Description).text().not_null())
                    .col(ColumnDef::new(Arts::ArtImage).text().not_null())
                    .col(ColumnDef::new(Arts::ArtistId).integer().not_null())
                    .col(
                        ColumnDef::new(Arts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Arts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_arts_artist_id")
                            .from(Arts::Table, Arts::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_arts_artist_id")
                    .table(Arts::Table)
                    .col(Arts::ArtistId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Arts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Arts {
    Table,
    Id,
    ArtName,
    ArtCategory,
    Description,
    ArtImage,
    ArtistId,
    CreatedAt,
    UpdatedAt,
}
