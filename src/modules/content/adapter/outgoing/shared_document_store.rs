use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::modules::content::application::ports::outgoing::{
    ChangeFeed, ChangeSubscription, ContentChange, ContentPersistence, PersistenceError,
};
use crate::modules::content::domain::defaults;
use crate::modules::content::domain::entities::{
    Collection, ContentSnapshot, EntityRecord, SettingsPatch,
};

struct ServiceInner {
    documents: Mutex<ContentSnapshot>,
    feed: ChangeFeed,
    offline: AtomicBool,
}

/// In-process document service shared by every connected client.
///
/// Writes are applied under one lock, so each record write is atomic, and the
/// changed collection is fanned out to every subscribed client.
#[derive(Clone)]
pub struct SharedDocumentService {
    inner: Arc<ServiceInner>,
}

impl SharedDocumentService {
    pub fn new() -> Self {
        Self::with_capacity(ChangeFeed::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(feed_capacity: usize) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                documents: Mutex::new(ContentSnapshot::default()),
                feed: ChangeFeed::new(feed_capacity),
                offline: AtomicBool::new(false),
            }),
        }
    }

    /// A new client handle with its own identity on the change feed.
    pub fn connect(&self) -> SharedDocumentClient {
        let client = SharedDocumentClient {
            id: Uuid::new_v4(),
            inner: Arc::clone(&self.inner),
        };
        debug!(client_id = %client.id, "Client connected to shared document service");
        client
    }

    /// Simulates losing (or regaining) the network. Reads and writes fail while offline.
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
        info!(offline, "Shared document service connectivity changed");
    }

    pub fn listener_count(&self) -> usize {
        self.inner.feed.listener_count()
    }
}

impl Default for SharedDocumentService {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SharedDocumentClient {
    id: Uuid,
    inner: Arc<ServiceInner>,
}

impl SharedDocumentClient {
    pub fn id(&self) -> Uuid {
        self.id
    }

    fn ensure_online(&self) -> Result<(), PersistenceError> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(
                "shared document service is offline".to_string(),
            ));
        }
        Ok(())
    }

    /// Publishes the current value of `collection`. Called with the document lock held
    /// so clients observe changes in write order.
    fn publish(&self, documents: &ContentSnapshot, collection: Collection) {
        if let Some(change) = ContentChange::from_snapshot(documents, collection) {
            let delivered = self.inner.feed.publish_from(self.id, change);
            debug!(collection = %collection, delivered, "Change fanned out");
        }
    }
}

#[async_trait]
impl ContentPersistence for SharedDocumentClient {
    async fn load_all(&self) -> Result<ContentSnapshot, PersistenceError> {
        self.ensure_online()?;
        Ok(self.inner.documents.lock().await.clone())
    }

    async fn write_entity(&self, record: EntityRecord) -> Result<(), PersistenceError> {
        self.ensure_online()?;
        let collection = record.collection();

        let mut documents = self.inner.documents.lock().await;
        documents.upsert(record);
        self.publish(&documents, collection);
        Ok(())
    }

    async fn delete_entity(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<(), PersistenceError> {
        self.ensure_online()?;

        let mut documents = self.inner.documents.lock().await;
        if documents.remove(collection, key) {
            self.publish(&documents, collection);
        }
        Ok(())
    }

    async fn write_settings(&self, patch: SettingsPatch) -> Result<(), PersistenceError> {
        if patch.is_empty() {
            return Ok(());
        }
        self.ensure_online()?;

        let mut documents = self.inner.documents.lock().await;
        let mut settings = documents.settings.take().unwrap_or_else(defaults::settings);
        patch.apply_to(&mut settings);
        documents.settings = Some(settings);
        self.publish(&documents, Collection::Settings);
        Ok(())
    }

    async fn mark_seeded(&self, collection: Collection) -> Result<(), PersistenceError> {
        self.ensure_online()?;
        self.inner.documents.lock().await.seeded.insert(collection);
        Ok(())
    }

    fn subscribe(&self, collection: Collection) -> ChangeSubscription {
        self.inner.feed.subscribe_excluding(collection, self.id)
    }
}
