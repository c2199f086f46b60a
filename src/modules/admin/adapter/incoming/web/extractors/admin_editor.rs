use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use crate::shared::api::ApiResponse;
use crate::AppState;

pub const ADMIN_SESSION_HEADER: &str = "X-Admin-Session";

/// A request made from an unlocked editor.
#[derive(Debug, Clone)]
pub struct AdminEditor {
    pub session: Uuid,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AdminEditor {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = extract_session(req);

        Box::pin(async move {
            let Some(state) = state else {
                return Err(create_api_error(ApiResponse::internal_error()));
            };

            let Some(session) = token else {
                return Err(create_api_error(ApiResponse::unauthorized(
                    "MISSING_ADMIN_SESSION",
                    "Editor is locked",
                )));
            };

            if !state.admin_sessions.is_active(session).await {
                return Err(create_api_error(ApiResponse::unauthorized(
                    "INVALID_ADMIN_SESSION",
                    "Editor session expired or unknown",
                )));
            }

            Ok(AdminEditor { session })
        })
    }
}

pub fn extract_session(req: &HttpRequest) -> Option<Uuid> {
    let raw = req.headers().get(ADMIN_SESSION_HEADER)?.to_str().ok()?;
    Uuid::parse_str(raw.trim()).ok()
}
