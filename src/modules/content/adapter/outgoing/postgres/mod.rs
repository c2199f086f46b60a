mod content_persistence_postgres;
mod pg_change_listener;
pub mod sea_orm_entity;

pub use content_persistence_postgres::{PostgresContentPersistence, NOTIFY_CHANNEL};
pub use pg_change_listener::{parse_notification, PgChangeListener};
