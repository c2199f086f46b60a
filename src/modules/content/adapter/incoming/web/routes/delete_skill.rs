use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminEditor;
use crate::modules::content::adapter::incoming::web::{store_error_response, MutationResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{delete, web, Responder};

/// Remove a skill by name
#[utoipa::path(
    delete,
    path = "/api/skills/{name}",
    tag = "skills",
    params(
        ("name" = String, Path, description = "Skill name, case sensitive"),
        ("X-Admin-Session" = String, Header, description = "Editor session token")
    ),
    responses(
        (status = 200, description = "Delete outcome", body = inline(SuccessResponse<MutationResponse>)),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (status = 503, description = "Content not loaded or not saved", body = ErrorResponse),
    )
)]
#[delete("/api/skills/{name}")]
pub async fn delete_skill_handler(
    _editor: AdminEditor,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.content.delete_skill(&path.into_inner()).await {
        Ok(outcome) => ApiResponse::success(MutationResponse::from(outcome)),
        Err(e) => store_error_response(&e),
    }
}
