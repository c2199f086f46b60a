pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

use crate::api::openapi::ApiDoc;
use crate::config::{AppConfig, PersistenceBackend};
use crate::modules::admin::adapter::outgoing::InMemoryAdminSessions;
use crate::modules::admin::application::ports::outgoing::AdminSessionStore;
use crate::modules::admin::application::AdminGate;
use crate::modules::content::adapter::outgoing::{
    LocalKeyedStore, PgChangeListener, PostgresContentPersistence, SharedDocumentService,
};
use crate::modules::content::application::ports::outgoing::{ChangeFeed, ContentPersistence};
use crate::modules::content::application::ContentStore;
use crate::shared::api::custom_json_config;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentStore>,
    pub admin_gate: Arc<AdminGate>,
    pub admin_sessions: Arc<dyn AdminSessionStore>,
}

#[cfg(not(tarpaulin_include))]
async fn connect_persistence(config: &AppConfig) -> anyhow::Result<Arc<dyn ContentPersistence>> {
    match config.backend {
        PersistenceBackend::Local => {
            info!(dir = %config.content_dir.display(), "Using local content store");
            Ok(Arc::new(LocalKeyedStore::new(config.content_dir.clone())))
        }
        PersistenceBackend::Shared => {
            info!("Using in-process shared document service");
            let service = SharedDocumentService::with_capacity(config.change_feed_capacity);
            Ok(Arc::new(service.connect()))
        }
        PersistenceBackend::Postgres => {
            let db_url = config
                .database_url
                .clone()
                .context("DATABASE_URL is not set")?;

            let mut opt = ConnectOptions::new(db_url.clone());
            opt.max_connections(20)
                .min_connections(2)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5))
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(1800))
                .sqlx_logging(false);

            let conn = Database::connect(opt)
                .await
                .context("Failed to connect to database")?;

            let persistence = Arc::new(PostgresContentPersistence::new(
                Arc::new(conn),
                ChangeFeed::new(config.change_feed_capacity),
            ));
            PgChangeListener::new(db_url, Arc::clone(&persistence)).spawn();

            info!(instance_id = %persistence.instance_id(), "Using Postgres content store");
            Ok(persistence)
        }
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environment variable loading
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env()?;
    let server_url = config.server_url();

    let persistence = connect_persistence(&config).await?;
    let content = Arc::new(ContentStore::new(persistence));

    // Content stays readable from bundled defaults until a load succeeds.
    let initial_load = tokio::spawn({
        let content = Arc::clone(&content);
        async move {
            content
                .initialize_with_retry(Duration::from_secs(1), Duration::from_secs(30))
                .await
        }
    });

    let admin_sessions: Arc<dyn AdminSessionStore> =
        Arc::new(InMemoryAdminSessions::with_ttl(config.admin_session_ttl));
    let state = AppState {
        content: Arc::clone(&content),
        admin_gate: Arc::new(AdminGate::new(&config.admin_passcode)),
        admin_sessions,
    };

    let openapi = ApiDoc::openapi();
    info!(server_url = %server_url, "Server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(custom_json_config())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()))
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    initial_load.abort();
    content.shutdown().await;
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::modules::admin::adapter::incoming::web::routes as admin;
    use crate::modules::content::adapter::incoming::web::routes as content;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Admin
    cfg.service(admin::login_admin_handler);
    cfg.service(admin::logout_admin_handler);
    // Content
    cfg.service(content::get_content_handler);
    cfg.service(content::content_events_handler);
    // Projects
    cfg.service(content::create_project_handler);
    cfg.service(content::update_project_handler);
    cfg.service(content::delete_project_handler);
    // Skills
    cfg.service(content::add_skill_handler);
    cfg.service(content::delete_skill_handler);
    cfg.service(content::add_category_handler);
    // Achievements
    cfg.service(content::create_achievement_handler);
    cfg.service(content::update_achievement_handler);
    cfg.service(content::delete_achievement_handler);
    // Settings
    cfg.service(content::update_video_url_handler);
    cfg.service(content::update_resume_links_handler);
    cfg.service(content::set_show_video_handler);
    cfg.service(content::set_accent_color_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
