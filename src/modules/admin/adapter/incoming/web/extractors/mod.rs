mod admin_editor;

pub use admin_editor::{extract_session, AdminEditor, ADMIN_SESSION_HEADER};
