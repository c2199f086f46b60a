mod admin_sessions_memory;

pub use admin_sessions_memory::InMemoryAdminSessions;
