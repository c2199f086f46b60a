pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_content_records_table;
mod m20261019_000002_create_site_settings_table;
mod m20261019_000003_create_content_seed_markers_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_content_records_table::Migration),
            Box::new(m20261019_000002_create_site_settings_table::Migration),
            Box::new(m20261019_000003_create_content_seed_markers_table::Migration),
        ]
    }
}
