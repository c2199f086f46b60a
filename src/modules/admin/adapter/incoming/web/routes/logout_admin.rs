use crate::api::schemas::ErrorResponse;
use crate::modules::admin::adapter::incoming::web::extractors::AdminEditor;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{delete, web, Responder};
use tracing::info;

/// Lock the editor
#[utoipa::path(
    delete,
    path = "/api/admin/session",
    tag = "admin",
    params(("X-Admin-Session" = String, Header, description = "Editor session token")),
    responses(
        (status = 204, description = "Editor locked"),
        (status = 401, description = "No active editor session", body = ErrorResponse),
    )
)]
#[delete("/api/admin/session")]
pub async fn logout_admin_handler(
    editor: AdminEditor,
    data: web::Data<AppState>,
) -> impl Responder {
    data.admin_sessions.revoke(editor.session).await;
    info!(session = %editor.session, "Editor locked");
    ApiResponse::no_content()
}
