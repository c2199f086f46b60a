use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminEditor;
use crate::modules::content::adapter::incoming::web::{store_error_response, MutationResponse};
use crate::modules::content::application::ports::incoming::{AchievementDraft, AchievementForm};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{put, web, Responder};

/// Replace an achievement
#[utoipa::path(
    put,
    path = "/api/achievements/{id}",
    tag = "achievements",
    request_body = AchievementForm,
    params(
        ("id" = String, Path, description = "Achievement id"),
        ("X-Admin-Session" = String, Header, description = "Editor session token")
    ),
    responses(
        (status = 200, description = "Update outcome", body = inline(SuccessResponse<MutationResponse>)),
        (status = 400, description = "Missing title", body = ErrorResponse),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (status = 503, description = "Content not loaded or not saved", body = ErrorResponse),
    )
)]
#[put("/api/achievements/{id}")]
pub async fn update_achievement_handler(
    _editor: AdminEditor,
    path: web::Path<String>,
    req: web::Json<AchievementForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    if req.title.trim().is_empty() {
        return ApiResponse::bad_request("VALIDATION_ERROR", "Achievement title is required");
    }

    let achievement = AchievementDraft::from(req.into_inner()).into_achievement(path.into_inner());
    match data.content.update_achievement(achievement).await {
        Ok(outcome) => ApiResponse::success(MutationResponse::from(outcome)),
        Err(e) => store_error_response(&e),
    }
}
