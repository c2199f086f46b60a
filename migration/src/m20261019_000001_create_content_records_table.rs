use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::{json_binary, text};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentRecords::Table)
                    .if_not_exists()
                    .col(text(ContentRecords::Collection))
                    .col(text(ContentRecords::Key))
                    .col(json_binary(ContentRecords::Payload))
                    // Insertion order; upserts keep the original value
                    .col(
                        ColumnDef::new(ContentRecords::Position)
                            .big_integer()
                            .not_null()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(ContentRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT now()".to_owned()),
                    )
                    .primary_key(
                        Index::create()
                            .col(ContentRecords::Collection)
                            .col(ContentRecords::Key),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ContentRecords::Table)
                    .name("idx_content_records_collection_position")
                    .col(ContentRecords::Collection)
                    .col(ContentRecords::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContentRecords {
    Table,
    Collection,
    Key,
    Payload,
    Position,
    UpdatedAt,
}
