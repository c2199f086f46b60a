use async_trait::async_trait;

use crate::modules::content::application::ports::outgoing::{
    ChangeSubscription, ContentPersistence, PersistenceError,
};
use crate::modules::content::domain::defaults;
use crate::modules::content::domain::entities::{
    Collection, ContentSnapshot, EntityRecord, SettingsPatch,
};

fn unavailable() -> PersistenceError {
    PersistenceError::Unavailable("stubbed network failure".to_string())
}

/// Loads the default content as already seeded; every write fails.
pub struct StubFailingWrites;

#[async_trait]
impl ContentPersistence for StubFailingWrites {
    async fn load_all(&self) -> Result<ContentSnapshot, PersistenceError> {
        let content = defaults::content();
        Ok(ContentSnapshot {
            projects: content.projects,
            skills: content.skills,
            achievements: content.achievements,
            categories: content.categories,
            settings: Some(content.settings),
            seeded: Collection::ALL.into_iter().collect(),
        })
    }

    async fn write_entity(&self, _record: EntityRecord) -> Result<(), PersistenceError> {
        Err(unavailable())
    }

    async fn delete_entity(
        &self,
        _collection: Collection,
        _key: &str,
    ) -> Result<(), PersistenceError> {
        Err(unavailable())
    }

    async fn write_settings(&self, _patch: SettingsPatch) -> Result<(), PersistenceError> {
        Err(unavailable())
    }

    async fn mark_seeded(&self, _collection: Collection) -> Result<(), PersistenceError> {
        Err(unavailable())
    }

    fn subscribe(&self, collection: Collection) -> ChangeSubscription {
        ChangeSubscription::detached(collection)
    }
}

/// Every call fails, including the initial load.
pub struct StubOffline;

#[async_trait]
impl ContentPersistence for StubOffline {
    async fn load_all(&self) -> Result<ContentSnapshot, PersistenceError> {
        Err(unavailable())
    }

    async fn write_entity(&self, _record: EntityRecord) -> Result<(), PersistenceError> {
        Err(unavailable())
    }

    async fn delete_entity(
        &self,
        _collection: Collection,
        _key: &str,
    ) -> Result<(), PersistenceError> {
        Err(unavailable())
    }

    async fn write_settings(&self, _patch: SettingsPatch) -> Result<(), PersistenceError> {
        Err(unavailable())
    }

    async fn mark_seeded(&self, _collection: Collection) -> Result<(), PersistenceError> {
        Err(unavailable())
    }

    fn subscribe(&self, collection: Collection) -> ChangeSubscription {
        ChangeSubscription::detached(collection)
    }
}
