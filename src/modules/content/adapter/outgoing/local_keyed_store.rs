use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::modules::content::application::ports::outgoing::{
    ChangeSubscription, ContentPersistence, PersistenceError,
};
use crate::modules::content::domain::defaults;
use crate::modules::content::domain::entities::{
    Collection, ContentSnapshot, EntityRecord, Settings, SettingsPatch,
};

const KEY_PREFIX: &str = "portfolio_";
const SEEDED_KEY: &str = "seeded";

/// Single-client store keeping one JSON document per collection on disk.
///
/// Documents are replaced with a write-to-temp-then-rename so a reader never
/// sees a half written file. There are no other writers, so subscriptions are
/// detached.
pub struct LocalKeyedStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl LocalKeyedStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{KEY_PREFIX}{key}.json"))
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, PersistenceError> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    async fn write_document<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))?;
        fs::write(&tmp, bytes).await.map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_error(&path, e))?;

        debug!(path = %path.display(), "Document written");
        Ok(())
    }

    async fn load_collection(
        &self,
        collection: Collection,
        snapshot: &mut ContentSnapshot,
    ) -> Result<(), PersistenceError> {
        let key = collection.as_str();
        match collection {
            Collection::Projects => {
                snapshot.projects = self.read_document(key).await?.unwrap_or_default()
            }
            Collection::Skills => {
                snapshot.skills = self.read_document(key).await?.unwrap_or_default()
            }
            Collection::Achievements => {
                snapshot.achievements = self.read_document(key).await?.unwrap_or_default()
            }
            Collection::Categories => {
                snapshot.categories = self.read_document(key).await?.unwrap_or_default()
            }
            Collection::Settings => snapshot.settings = self.read_document(key).await?,
        }
        Ok(())
    }

    async fn store_collection(
        &self,
        collection: Collection,
        snapshot: &ContentSnapshot,
    ) -> Result<(), PersistenceError> {
        let key = collection.as_str();
        match collection {
            Collection::Projects => self.write_document(key, &snapshot.projects).await,
            Collection::Skills => self.write_document(key, &snapshot.skills).await,
            Collection::Achievements => self.write_document(key, &snapshot.achievements).await,
            Collection::Categories => self.write_document(key, &snapshot.categories).await,
            Collection::Settings => self.write_document(key, &snapshot.settings).await,
        }
    }
}

fn io_error(path: &Path, e: std::io::Error) -> PersistenceError {
    warn!(path = %path.display(), error = %e, "Local content store I/O failed");
    match e.kind() {
        ErrorKind::PermissionDenied => PersistenceError::PermissionDenied(e.to_string()),
        _ => PersistenceError::Storage(e.to_string()),
    }
}

#[async_trait]
impl ContentPersistence for LocalKeyedStore {
    async fn load_all(&self) -> Result<ContentSnapshot, PersistenceError> {
        let _guard = self.lock.lock().await;

        let mut snapshot = ContentSnapshot::default();
        for collection in Collection::ALL {
            self.load_collection(collection, &mut snapshot).await?;
        }
        snapshot.seeded = self.read_document(SEEDED_KEY).await?.unwrap_or_default();
        Ok(snapshot)
    }

    async fn write_entity(&self, record: EntityRecord) -> Result<(), PersistenceError> {
        let _guard = self.lock.lock().await;
        let collection = record.collection();

        let mut snapshot = ContentSnapshot::default();
        self.load_collection(collection, &mut snapshot).await?;
        snapshot.upsert(record);
        self.store_collection(collection, &snapshot).await
    }

    async fn delete_entity(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<(), PersistenceError> {
        let _guard = self.lock.lock().await;

        let mut snapshot = ContentSnapshot::default();
        self.load_collection(collection, &mut snapshot).await?;
        if !snapshot.remove(collection, key) {
            return Ok(());
        }
        self.store_collection(collection, &snapshot).await
    }

    async fn write_settings(&self, patch: SettingsPatch) -> Result<(), PersistenceError> {
        if patch.is_empty() {
            return Ok(());
        }
        let _guard = self.lock.lock().await;

        let mut settings: Settings = self
            .read_document(Collection::Settings.as_str())
            .await?
            .unwrap_or_else(defaults::settings);
        patch.apply_to(&mut settings);
        self.write_document(Collection::Settings.as_str(), &settings)
            .await
    }

    async fn mark_seeded(&self, collection: Collection) -> Result<(), PersistenceError> {
        let _guard = self.lock.lock().await;

        let mut seeded: BTreeSet<Collection> =
            self.read_document(SEEDED_KEY).await?.unwrap_or_default();
        if seeded.insert(collection) {
            self.write_document(SEEDED_KEY, &seeded).await?;
        }
        Ok(())
    }

    fn subscribe(&self, collection: Collection) -> ChangeSubscription {
        ChangeSubscription::detached(collection)
    }
}
