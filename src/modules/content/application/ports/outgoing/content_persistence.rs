use async_trait::async_trait;

use super::change_feed::ChangeSubscription;
use crate::modules::content::domain::entities::{
    Collection, ContentSnapshot, EntityRecord, SettingsPatch,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// Backend unreachable (network down, database offline).
    #[error("Persistence backend unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Serialization(e.to_string())
    }
}

/// Durable home of the portfolio content.
///
/// Each write touches exactly one record and is atomic for it: a concurrent
/// reader sees either the old or the new record, never a mix. A failed write
/// leaves previously stored data intact.
#[async_trait]
pub trait ContentPersistence: Send + Sync {
    /// Current durable snapshot. An untouched store yields an empty snapshot, not an error.
    async fn load_all(&self) -> Result<ContentSnapshot, PersistenceError>;

    /// Upserts one keyed record. Updating keeps the record's place in read order.
    async fn write_entity(&self, record: EntityRecord) -> Result<(), PersistenceError>;

    /// Removes one keyed record. Removing a missing key succeeds.
    async fn delete_entity(&self, collection: Collection, key: &str)
        -> Result<(), PersistenceError>;

    /// Merge-patches the settings singleton.
    async fn write_settings(&self, patch: SettingsPatch) -> Result<(), PersistenceError>;

    /// Records that a collection received its one-time default seed.
    async fn mark_seeded(&self, collection: Collection) -> Result<(), PersistenceError>;

    /// Listener for durable changes of one collection, including other clients' writes.
    fn subscribe(&self, collection: Collection) -> ChangeSubscription;
}
