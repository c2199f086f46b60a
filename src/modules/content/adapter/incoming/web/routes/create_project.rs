use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminEditor;
use crate::modules::content::adapter::incoming::web::store_error_response;
use crate::modules::content::application::ports::incoming::{ProjectDraft, ProjectForm};
use crate::modules::content::domain::entities::Project;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use tracing::info;

/// Add a project
///
/// The project gets a fresh time-based id and is listed first. A blank image
/// falls back to a stock image; technologies are comma separated.
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "projects",
    request_body = ProjectForm,
    params(("X-Admin-Session" = String, Header, description = "Editor session token")),
    responses(
        (status = 201, description = "Project added", body = inline(SuccessResponse<Project>)),
        (status = 400, description = "Missing title", body = ErrorResponse),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (
            status = 503,
            description = "Content not loaded or not saved",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "PERSISTENCE_UNAVAILABLE",
                    "message": "Persistence backend unavailable: network down"
                }
            })
        ),
    )
)]
#[post("/api/projects")]
pub async fn create_project_handler(
    _editor: AdminEditor,
    req: web::Json<ProjectForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    let draft = ProjectDraft::from(req.into_inner());
    if draft.title().is_empty() {
        return ApiResponse::bad_request("VALIDATION_ERROR", "Project title is required");
    }

    match data.content.add_project(draft).await {
        Ok(project) => {
            info!(project_id = %project.id, "Project created");
            ApiResponse::created(project)
        }
        Err(e) => store_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::admin::adapter::incoming::web::extractors::ADMIN_SESSION_HEADER;
    use crate::modules::content::domain::defaults::FALLBACK_IMAGE_URL;
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::{editor_token, TestAppStateBuilder};
    use crate::tests::support::stubs::StubFailingWrites;
    use actix_web::{test, App};

    fn project_json() -> serde_json::Value {
        serde_json::json!({
            "title": "Portfolio Sync",
            "description": "Keeps content in sync",
            "technologies": "Rust, Actix , ",
            "githubUrl": "",
            "image": ""
        })
    }

    #[actix_web::test]
    async fn test_create_project_success() {
        let app_state = TestAppStateBuilder::default().build().await;
        let token = editor_token(&app_state).await;
        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .app_data(custom_json_config())
                .service(create_project_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header((ADMIN_SESSION_HEADER, token))
            .set_json(project_json())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["title"], "Portfolio Sync");
        assert_eq!(body["data"]["technologies"], serde_json::json!(["Rust", "Actix"]));
        assert_eq!(body["data"]["image"], FALLBACK_IMAGE_URL);
        assert!(body["data"].get("githubUrl").is_none());

        let first = &app_state.content.projects()[0];
        assert_eq!(body["data"]["id"], first.id.as_str());
    }

    #[actix_web::test]
    async fn test_create_project_requires_editor_session() {
        let app_state = TestAppStateBuilder::default().build().await;
        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .service(create_project_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_json(project_json())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
        assert_eq!(app_state.content.projects().len(), 3);
    }

    #[actix_web::test]
    async fn test_create_project_blank_title() {
        let app_state = TestAppStateBuilder::default().build().await;
        let token = editor_token(&app_state).await;
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(create_project_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header((ADMIN_SESSION_HEADER, token))
            .set_json(serde_json::json!({ "title": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_create_project_persistence_failure_rolls_back() {
        let app_state = TestAppStateBuilder::default()
            .with_persistence(StubFailingWrites)
            .build()
            .await;
        let token = editor_token(&app_state).await;
        let app = test::init_service(
            App::new()
                .app_data(app_state.clone())
                .service(create_project_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header((ADMIN_SESSION_HEADER, token))
            .set_json(project_json())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "PERSISTENCE_UNAVAILABLE");
        assert_eq!(app_state.content.projects().len(), 3);
    }

    #[actix_web::test]
    async fn test_create_project_before_content_is_loaded() {
        let app_state = TestAppStateBuilder::default().uninitialized().build().await;
        let token = editor_token(&app_state).await;
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(create_project_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header((ADMIN_SESSION_HEADER, token))
            .set_json(project_json())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "CONTENT_NOT_READY");
    }
}
