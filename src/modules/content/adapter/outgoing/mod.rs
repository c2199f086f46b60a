mod local_keyed_store;
pub mod postgres;
mod shared_document_store;

pub use local_keyed_store::LocalKeyedStore;
pub use postgres::{PgChangeListener, PostgresContentPersistence};
pub use shared_document_store::{SharedDocumentClient, SharedDocumentService};
