use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminEditor;
use crate::modules::content::adapter::incoming::web::store_error_response;
use crate::modules::content::application::ports::incoming::{AchievementDraft, AchievementForm};
use crate::modules::content::domain::entities::Achievement;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use tracing::info;

/// Add an achievement
#[utoipa::path(
    post,
    path = "/api/achievements",
    tag = "achievements",
    request_body = AchievementForm,
    params(("X-Admin-Session" = String, Header, description = "Editor session token")),
    responses(
        (status = 201, description = "Achievement added", body = inline(SuccessResponse<Achievement>)),
        (status = 400, description = "Missing title", body = ErrorResponse),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (status = 503, description = "Content not loaded or not saved", body = ErrorResponse),
    )
)]
#[post("/api/achievements")]
pub async fn create_achievement_handler(
    _editor: AdminEditor,
    req: web::Json<AchievementForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    if req.title.trim().is_empty() {
        return ApiResponse::bad_request("VALIDATION_ERROR", "Achievement title is required");
    }

    let draft = AchievementDraft::from(req.into_inner());
    match data.content.add_achievement(draft).await {
        Ok(achievement) => {
            info!(achievement_id = %achievement.id, "Achievement created");
            ApiResponse::created(achievement)
        }
        Err(e) => store_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::admin::adapter::incoming::web::extractors::ADMIN_SESSION_HEADER;
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::{editor_token, TestAppStateBuilder};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_create_achievement_is_listed_first() {
        let app_state = TestAppStateBuilder::default().build().await;
        let token = editor_token(&app_state).await;
        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .service(create_achievement_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/achievements")
            .insert_header((ADMIN_SESSION_HEADER, token))
            .set_json(serde_json::json!({
                "title": "Best Demo",
                "issuer": "RustConf",
                "date": "Sep 2025",
                "category": "award"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["category"], "award");
        let first = &app_state.content.achievements()[0];
        assert_eq!(first.title, "Best Demo");
        assert_eq!(body["data"]["id"], first.id.as_str());
    }

    #[actix_web::test]
    async fn test_create_achievement_rejects_unknown_category() {
        let app_state = TestAppStateBuilder::default().build().await;
        let token = editor_token(&app_state).await;
        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .app_data(custom_json_config())
                .service(create_achievement_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/achievements")
            .insert_header((ADMIN_SESSION_HEADER, token))
            .set_json(serde_json::json!({
                "title": "Best Demo",
                "issuer": "RustConf",
                "category": "trophy"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        assert_eq!(app_state.content.achievements().len(), 2);
    }
}
