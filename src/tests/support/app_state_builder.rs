use crate::modules::admin::adapter::outgoing::InMemoryAdminSessions;
use crate::modules::admin::application::ports::outgoing::AdminSessionStore;
use crate::modules::admin::application::AdminGate;
use crate::modules::content::adapter::outgoing::SharedDocumentService;
use crate::modules::content::application::ports::outgoing::ContentPersistence;
use crate::modules::content::application::ContentStore;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub const TEST_PASSCODE: &str = "test-editor-passcode";

pub struct TestAppStateBuilder {
    persistence: Arc<dyn ContentPersistence>,
    initialize: bool,
    passcode: String,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            persistence: Arc::new(SharedDocumentService::new().connect()),
            initialize: true,
            passcode: TEST_PASSCODE.to_string(),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_persistence(mut self, persistence: impl ContentPersistence + 'static) -> Self {
        self.persistence = Arc::new(persistence);
        self
    }

    pub fn with_shared_persistence(mut self, persistence: Arc<dyn ContentPersistence>) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_passcode(mut self, passcode: &str) -> Self {
        self.passcode = passcode.to_string();
        self
    }

    /// Skips the initial load, leaving the store serving defaults.
    pub fn uninitialized(mut self) -> Self {
        self.initialize = false;
        self
    }

    pub async fn build(self) -> web::Data<AppState> {
        let content = Arc::new(ContentStore::new(self.persistence));
        if self.initialize {
            content
                .initialize()
                .await
                .expect("test content store failed to initialize");
        }

        let admin_sessions: Arc<dyn AdminSessionStore> = Arc::new(InMemoryAdminSessions::new());

        web::Data::new(AppState {
            content,
            admin_gate: Arc::new(AdminGate::new(&self.passcode)),
            admin_sessions,
        })
    }
}

/// Opens an editor session directly on the session store.
pub async fn editor_token(state: &web::Data<AppState>) -> String {
    state.admin_sessions.issue().await.to_string()
}
