mod admin_session_store;

pub use admin_session_store::AdminSessionStore;
