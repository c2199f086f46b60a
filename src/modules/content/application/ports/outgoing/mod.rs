pub mod change_feed;
pub mod content_persistence;

pub use change_feed::{ChangeFeed, ChangeSubscription, ContentChange};
pub use content_persistence::{ContentPersistence, PersistenceError};
