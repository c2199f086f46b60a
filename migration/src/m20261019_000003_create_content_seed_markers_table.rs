use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::text;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentSeedMarkers::Table)
                    .if_not_exists()
                    .col(text(ContentSeedMarkers::Collection).primary_key())
                    .col(
                        ColumnDef::new(ContentSeedMarkers::SeededAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT now()".to_owned()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentSeedMarkers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContentSeedMarkers {
    Table,
    Collection,
    SeededAt,
}
