use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::content_persistence_postgres::{PostgresContentPersistence, NOTIFY_CHANNEL};
use crate::modules::content::domain::entities::Collection;

const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Bridges Postgres `LISTEN` to the adapter's change feed.
///
/// Each notification names a collection; the listener re-reads it and relays
/// the current value to local subscribers. After every (re)connect all
/// collections are relayed once, covering notifications missed while away.
pub struct PgChangeListener {
    database_url: String,
    persistence: Arc<PostgresContentPersistence>,
}

impl PgChangeListener {
    pub fn new(database_url: impl Into<String>, persistence: Arc<PostgresContentPersistence>) -> Self {
        Self {
            database_url: database_url.into(),
            persistence,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        loop {
            if let Err(e) = self.listen().await {
                warn!(error = %e, retry_in = ?RETRY_DELAY, "Content notification listener disconnected");
            }
            tokio::time::sleep(RETRY_DELAY).await;
        }
    }

    async fn listen(&self) -> Result<(), sqlx::Error> {
        let mut listener = PgListener::connect(&self.database_url).await?;
        listener.listen(NOTIFY_CHANNEL).await?;
        info!(channel = NOTIFY_CHANNEL, "Listening for content notifications");

        for collection in Collection::ALL {
            self.relay(collection, None).await;
        }

        loop {
            let notification = listener.recv().await?;
            match parse_notification(notification.payload()) {
                Some((collection, origin)) => self.relay(collection, origin).await,
                None => warn!(payload = notification.payload(), "Ignoring malformed content notification"),
            }
        }
    }

    async fn relay(&self, collection: Collection, origin: Option<Uuid>) {
        if let Err(e) = self.persistence.relay(collection, origin).await {
            warn!(collection = %collection, error = %e, "Re-reading notified collection failed");
        }
    }
}

/// Parses `<collection>[:<writer id>]`.
pub fn parse_notification(payload: &str) -> Option<(Collection, Option<Uuid>)> {
    let (name, origin) = match payload.split_once(':') {
        Some((name, origin)) => (name, Some(origin)),
        None => (payload, None),
    };

    let collection = Collection::parse(name.trim())?;
    let origin = match origin {
        Some(raw) => match Uuid::parse_str(raw.trim()) {
            Ok(id) => Some(id),
            Err(_) => {
                debug!(payload, "Notification carries an unreadable writer id");
                None
            }
        },
        None => None,
    };

    Some((collection, origin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_with_writer_id_is_parsed() {
        let id = Uuid::new_v4();
        let parsed = parse_notification(&format!("skills:{id}"));
        assert_eq!(parsed, Some((Collection::Skills, Some(id))));
    }

    #[test]
    fn bare_collection_name_is_accepted() {
        assert_eq!(
            parse_notification("settings"),
            Some((Collection::Settings, None))
        );
    }

    #[test]
    fn unknown_collection_is_rejected() {
        assert_eq!(parse_notification("widgets:abc"), None);
        assert_eq!(parse_notification(""), None);
    }

    #[test]
    fn unreadable_writer_id_is_dropped() {
        assert_eq!(
            parse_notification("projects:not-a-uuid"),
            Some((Collection::Projects, None))
        );
    }
}
