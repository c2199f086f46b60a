use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Statement, TransactionTrait,
};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::sea_orm_entity::{content_records, content_seed_markers, site_settings};
use crate::modules::content::application::ports::outgoing::{
    ChangeFeed, ChangeSubscription, ContentChange, ContentPersistence, PersistenceError,
};
use crate::modules::content::domain::defaults;
use crate::modules::content::domain::entities::{
    Collection, ContentSnapshot, EntityRecord, Settings, SettingsPatch,
};

/// Channel every content write notifies on. The payload is `<collection>:<writer id>`.
pub const NOTIFY_CHANNEL: &str = "portfolio_content";

// ============================================================================
// Adapter
// ============================================================================

/// Networked, durable content store on Postgres.
///
/// Every write runs in its own transaction together with a `pg_notify`, so
/// other instances hear about a change exactly when it commits.
/// [`PgChangeListener`](super::PgChangeListener) turns those notifications
/// back into [`ContentChange`]s on this adapter's feed.
#[derive(Clone)]
pub struct PostgresContentPersistence {
    db: Arc<DatabaseConnection>,
    feed: ChangeFeed,
    instance_id: Uuid,
}

impl PostgresContentPersistence {
    pub fn new(db: Arc<DatabaseConnection>, feed: ChangeFeed) -> Self {
        Self {
            db,
            feed,
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    // =====================================================
    // SQL builders
    // =====================================================

    /// Upsert that keeps the original `position` of an existing record.
    fn upsert_record_stmt(collection: Collection, key: &str, payload: serde_json::Value) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO content_records (collection, key, payload, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, key)
            DO UPDATE SET payload = EXCLUDED.payload,
                          updated_at = EXCLUDED.updated_at
            "#,
            vec![collection.as_str().into(), key.into(), payload.into()],
        )
    }

    fn delete_record_stmt(collection: Collection, key: &str) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            DELETE FROM content_records
            WHERE collection = $1
              AND key = $2
            "#,
            vec![collection.as_str().into(), key.into()],
        )
    }

    /// First write stores `initial`; later writes merge `patch` into the stored
    /// document with jsonb `||`, atomically in the database.
    fn merge_settings_stmt(initial: serde_json::Value, patch: serde_json::Value) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO site_settings (id, payload, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (id)
            DO UPDATE SET payload = site_settings.payload || $3::jsonb,
                          updated_at = now()
            "#,
            vec![site_settings::SINGLETON_ID.into(), initial.into(), patch.into()],
        )
    }

    fn mark_seeded_stmt(collection: Collection) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO content_seed_markers (collection, seeded_at)
            VALUES ($1, now())
            ON CONFLICT (collection) DO NOTHING
            "#,
            vec![collection.as_str().into()],
        )
    }

    fn notify_stmt(&self, collection: Collection) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT pg_notify($1, $2)",
            vec![
                NOTIFY_CHANNEL.into(),
                format!("{}:{}", collection, self.instance_id).into(),
            ],
        )
    }

    // =====================================================
    // Reads
    // =====================================================

    async fn load_records(
        &self,
        collection: Option<Collection>,
    ) -> Result<ContentSnapshot, PersistenceError> {
        let mut query = content_records::Entity::find();
        if let Some(collection) = collection {
            query = query.filter(content_records::Column::Collection.eq(collection.as_str()));
        }

        let models = query
            .order_by_asc(content_records::Column::Position)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        snapshot_from_records(models)
    }

    async fn load_settings(&self) -> Result<Option<Settings>, PersistenceError> {
        let model = site_settings::Entity::find_by_id(site_settings::SINGLETON_ID)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        match model {
            Some(model) => Ok(Some(serde_json::from_value(model.payload)?)),
            None => Ok(None),
        }
    }

    /// Re-reads one collection as a change. `None` for settings never stored.
    pub async fn load_change(
        &self,
        collection: Collection,
    ) -> Result<Option<ContentChange>, PersistenceError> {
        let snapshot = if collection == Collection::Settings {
            ContentSnapshot {
                settings: self.load_settings().await?,
                ..Default::default()
            }
        } else {
            self.load_records(Some(collection)).await?
        };

        Ok(ContentChange::from_snapshot(&snapshot, collection))
    }

    /// Fans out the current value of `collection` to local subscribers.
    pub async fn relay(
        &self,
        collection: Collection,
        origin: Option<Uuid>,
    ) -> Result<usize, PersistenceError> {
        let Some(change) = self.load_change(collection).await? else {
            return Ok(0);
        };

        let delivered = match origin {
            Some(origin) => self.feed.publish_from(origin, change),
            None => self.feed.publish(change),
        };
        debug!(collection = %collection, delivered, "Relayed database change");
        Ok(delivered)
    }

    // =====================================================
    // Writes
    // =====================================================

    /// Runs `stmt` and the change notification in one transaction.
    /// Returns the rows affected by `stmt`.
    async fn execute_and_notify(
        &self,
        stmt: Statement,
        collection: Collection,
        notify_if_unchanged: bool,
    ) -> Result<u64, PersistenceError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let affected = txn.execute(stmt).await.map_err(map_db_err)?.rows_affected();
        if affected > 0 || notify_if_unchanged {
            txn.execute(self.notify_stmt(collection))
                .await
                .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(affected)
    }
}

#[async_trait]
impl ContentPersistence for PostgresContentPersistence {
    async fn load_all(&self) -> Result<ContentSnapshot, PersistenceError> {
        let mut snapshot = self.load_records(None).await?;
        snapshot.settings = self.load_settings().await?;

        let markers = content_seed_markers::Entity::find()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        snapshot.seeded = markers
            .iter()
            .filter_map(|m| Collection::parse(&m.collection))
            .collect();

        Ok(snapshot)
    }

    async fn write_entity(&self, record: EntityRecord) -> Result<(), PersistenceError> {
        let collection = record.collection();
        let payload = record.to_value()?;
        let stmt = Self::upsert_record_stmt(collection, record.key(), payload);

        self.execute_and_notify(stmt, collection, true).await?;
        Ok(())
    }

    async fn delete_entity(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<(), PersistenceError> {
        let stmt = Self::delete_record_stmt(collection, key);
        let affected = self.execute_and_notify(stmt, collection, false).await?;

        if affected == 0 {
            debug!(collection = %collection, key, "Delete matched no record");
        }
        Ok(())
    }

    async fn write_settings(&self, patch: SettingsPatch) -> Result<(), PersistenceError> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut initial = defaults::settings();
        patch.apply_to(&mut initial);

        let stmt = Self::merge_settings_stmt(
            serde_json::to_value(&initial)?,
            serde_json::to_value(&patch)?,
        );
        self.execute_and_notify(stmt, Collection::Settings, true)
            .await?;
        Ok(())
    }

    async fn mark_seeded(&self, collection: Collection) -> Result<(), PersistenceError> {
        self.db
            .execute(Self::mark_seeded_stmt(collection))
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    fn subscribe(&self, collection: Collection) -> ChangeSubscription {
        self.feed.subscribe_excluding(collection, self.instance_id)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn snapshot_from_records(
    models: Vec<content_records::Model>,
) -> Result<ContentSnapshot, PersistenceError> {
    let mut snapshot = ContentSnapshot::default();

    for model in models {
        let Some(collection) = Collection::parse(&model.collection) else {
            warn!(collection = %model.collection, key = %model.key, "Skipping record of unknown collection");
            continue;
        };
        if let Some(record) = EntityRecord::from_value(collection, model.payload)? {
            snapshot.push_record(record);
        }
    }

    // Rows come back oldest first; prepending collections read newest first.
    snapshot.projects.reverse();
    snapshot.achievements.reverse();
    Ok(snapshot)
}

fn map_db_err(e: DbErr) -> PersistenceError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => PersistenceError::Unavailable(e.to_string()),
        _ => PersistenceError::Storage(e.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================
