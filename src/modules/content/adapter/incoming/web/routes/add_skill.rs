use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminEditor;
use crate::modules::content::adapter::incoming::web::{store_error_response, MutationResponse};
use crate::modules::content::application::ports::incoming::SkillForm;
use crate::modules::content::domain::entities::Skill;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};

/// Add a skill
///
/// Blank or already listed names are ignored and report `applied: false`.
#[utoipa::path(
    post,
    path = "/api/skills",
    tag = "skills",
    request_body = SkillForm,
    params(("X-Admin-Session" = String, Header, description = "Editor session token")),
    responses(
        (status = 200, description = "Add outcome", body = inline(SuccessResponse<MutationResponse>)),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (status = 503, description = "Content not loaded or not saved", body = ErrorResponse),
    )
)]
#[post("/api/skills")]
pub async fn add_skill_handler(
    _editor: AdminEditor,
    req: web::Json<SkillForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.content.add_skill(Skill::from(req.into_inner())).await {
        Ok(outcome) => ApiResponse::success(MutationResponse::from(outcome)),
        Err(e) => store_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::admin::adapter::incoming::web::extractors::ADMIN_SESSION_HEADER;
    use crate::tests::support::app_state_builder::{editor_token, TestAppStateBuilder};
    use actix_web::{test, App};

    async fn post_skill(
        app_state: &web::Data<AppState>,
        name: &str,
    ) -> serde_json::Value {
        let token = editor_token(app_state).await;
        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .service(add_skill_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/skills")
            .insert_header((ADMIN_SESSION_HEADER, token))
            .set_json(serde_json::json!({ "name": name, "category": "programming" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        test::read_body_json(resp).await
    }

    #[actix_web::test]
    async fn test_add_skill_appends() {
        let app_state = TestAppStateBuilder::default().build().await;

        let body = post_skill(&app_state, " Rust ").await;

        assert_eq!(body["data"]["applied"], true);
        let skills = app_state.content.skills();
        let last = skills.last().unwrap();
        assert_eq!(last.name, "Rust");
        assert_eq!(last.category, "programming");
    }

    #[actix_web::test]
    async fn test_add_duplicate_skill_is_ignored() {
        let app_state = TestAppStateBuilder::default().build().await;
        let before = app_state.content.skills().len();

        let body = post_skill(&app_state, "Python").await;

        assert_eq!(body["data"]["applied"], false);
        assert_eq!(app_state.content.skills().len(), before);
    }

    #[actix_web::test]
    async fn test_add_blank_skill_is_ignored() {
        let app_state = TestAppStateBuilder::default().build().await;
        let before = app_state.content.skills().len();

        let body = post_skill(&app_state, "   ").await;

        assert_eq!(body["data"]["applied"], false);
        assert_eq!(app_state.content.skills().len(), before);
    }
}
