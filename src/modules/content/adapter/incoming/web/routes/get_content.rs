use crate::api::schemas::SuccessResponse;
use crate::modules::content::adapter::incoming::web::ContentResponse;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};

/// Read all portfolio content
///
/// Served from memory. Before the first load completes this is the bundled
/// default content.
#[utoipa::path(
    get,
    path = "/api/content",
    tag = "content",
    responses(
        (status = 200, description = "Current content", body = inline(SuccessResponse<ContentResponse>)),
    )
)]
#[get("/api/content")]
pub async fn get_content_handler(data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(ContentResponse::from(data.content.snapshot()))
}
