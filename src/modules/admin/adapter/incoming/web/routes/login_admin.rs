use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::application::AdminGateError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    #[schema(example = "correct horse battery staple")]
    pub passcode: String,
}

#[derive(Serialize, ToSchema)]
pub struct AdminSessionResponse {
    /// Send back in the `X-Admin-Session` header on editor requests
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub session_token: String,
}

/// Unlock the editor
///
/// Checks the shared editor passcode and opens an editor session.
#[utoipa::path(
    post,
    path = "/api/admin/session",
    tag = "admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Editor unlocked", body = inline(SuccessResponse<AdminSessionResponse>)),
        (
            status = 401,
            description = "Wrong passcode",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INCORRECT_CREDENTIAL",
                    "message": "Incorrect password!"
                }
            })
        ),
    )
)]
#[post("/api/admin/session")]
pub async fn login_admin_handler(
    req: web::Json<AdminLoginRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.admin_gate.verify(&req.passcode) {
        Ok(()) => {
            let token = data.admin_sessions.issue().await;
            info!(session = %token, "Editor unlocked");
            ApiResponse::success(AdminSessionResponse {
                session_token: token.to_string(),
            })
        }
        Err(e @ AdminGateError::IncorrectCredential) => {
            warn!("Editor unlock rejected");
            ApiResponse::unauthorized("INCORRECT_CREDENTIAL", &e.to_string())
        }
    }
}
