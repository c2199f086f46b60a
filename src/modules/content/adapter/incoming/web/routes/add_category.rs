use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminEditor;
use crate::modules::content::adapter::incoming::web::{store_error_response, MutationResponse};
use crate::modules::content::application::ports::incoming::CategoryForm;
use crate::modules::content::domain::entities::Category;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};

/// Add a skill category
///
/// The key is lowercased with whitespace runs turned into `-`.
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "skills",
    request_body = CategoryForm,
    params(("X-Admin-Session" = String, Header, description = "Editor session token")),
    responses(
        (status = 200, description = "Add outcome", body = inline(SuccessResponse<MutationResponse>)),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (status = 503, description = "Content not loaded or not saved", body = ErrorResponse),
    )
)]
#[post("/api/categories")]
pub async fn add_category_handler(
    _editor: AdminEditor,
    req: web::Json<CategoryForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.content.add_category(Category::from(req.into_inner())).await {
        Ok(outcome) => ApiResponse::success(MutationResponse::from(outcome)),
        Err(e) => store_error_response(&e),
    }
}
