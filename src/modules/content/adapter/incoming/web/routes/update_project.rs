use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminEditor;
use crate::modules::content::adapter::incoming::web::{store_error_response, MutationResponse};
use crate::modules::content::application::ports::incoming::{ProjectDraft, ProjectForm};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{put, web, Responder};

/// Replace a project
///
/// An unknown id changes nothing and reports `applied: false`.
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = "projects",
    request_body = ProjectForm,
    params(
        ("id" = String, Path, description = "Project id"),
        ("X-Admin-Session" = String, Header, description = "Editor session token")
    ),
    responses(
        (status = 200, description = "Update outcome", body = inline(SuccessResponse<MutationResponse>)),
        (status = 400, description = "Missing title", body = ErrorResponse),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (status = 503, description = "Content not loaded or not saved", body = ErrorResponse),
    )
)]
#[put("/api/projects/{id}")]
pub async fn update_project_handler(
    _editor: AdminEditor,
    path: web::Path<String>,
    req: web::Json<ProjectForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    let draft = ProjectDraft::from(req.into_inner());
    if draft.title().is_empty() {
        return ApiResponse::bad_request("VALIDATION_ERROR", "Project title is required");
    }

    let project = draft.into_project(path.into_inner());
    match data.content.update_project(project).await {
        Ok(outcome) => ApiResponse::success(MutationResponse::from(outcome)),
        Err(e) => store_error_response(&e),
    }
}
