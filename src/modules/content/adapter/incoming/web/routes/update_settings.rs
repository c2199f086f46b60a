use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminEditor;
use crate::modules::content::adapter::incoming::web::store_error_response;
use crate::modules::content::domain::entities::Settings;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{put, web, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct VideoUrlRequest {
    /// Watch, short or embed link; stored in embed form
    #[schema(example = "https://youtu.be/dQw4w9WgXcQ")]
    pub url: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeLinksRequest {
    #[schema(example = "https://drive.example.com/resume/view")]
    pub view_url: String,
    #[serde(default)]
    pub download_url: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ShowVideoRequest {
    pub show: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct AccentColorRequest {
    /// HSL token, e.g. "199 89% 48%"
    #[schema(example = "199 89% 48%")]
    pub color: String,
}

/// Set the intro video
#[utoipa::path(
    put,
    path = "/api/settings/video",
    tag = "settings",
    request_body = VideoUrlRequest,
    params(("X-Admin-Session" = String, Header, description = "Editor session token")),
    responses(
        (status = 200, description = "Updated settings", body = inline(SuccessResponse<Settings>)),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (status = 503, description = "Content not loaded or not saved", body = ErrorResponse),
    )
)]
#[put("/api/settings/video")]
pub async fn update_video_url_handler(
    _editor: AdminEditor,
    req: web::Json<VideoUrlRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.content.update_video_url(&req.url).await {
        Ok(settings) => ApiResponse::success(settings),
        Err(e) => store_error_response(&e),
    }
}

/// Set the resume view and download links
#[utoipa::path(
    put,
    path = "/api/settings/resume",
    tag = "settings",
    request_body = ResumeLinksRequest,
    params(("X-Admin-Session" = String, Header, description = "Editor session token")),
    responses(
        (status = 200, description = "Updated settings", body = inline(SuccessResponse<Settings>)),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (status = 503, description = "Content not loaded or not saved", body = ErrorResponse),
    )
)]
#[put("/api/settings/resume")]
pub async fn update_resume_links_handler(
    _editor: AdminEditor,
    req: web::Json<ResumeLinksRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .content
        .update_resume_links(&req.view_url, &req.download_url)
        .await
    {
        Ok(settings) => ApiResponse::success(settings),
        Err(e) => store_error_response(&e),
    }
}

/// Show or hide the intro video
#[utoipa::path(
    put,
    path = "/api/settings/show-video",
    tag = "settings",
    request_body = ShowVideoRequest,
    params(("X-Admin-Session" = String, Header, description = "Editor session token")),
    responses(
        (status = 200, description = "Updated settings", body = inline(SuccessResponse<Settings>)),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (status = 503, description = "Content not loaded or not saved", body = ErrorResponse),
    )
)]
#[put("/api/settings/show-video")]
pub async fn set_show_video_handler(
    _editor: AdminEditor,
    req: web::Json<ShowVideoRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.content.set_show_video(req.show).await {
        Ok(settings) => ApiResponse::success(settings),
        Err(e) => store_error_response(&e),
    }
}

/// Change the accent color
///
/// Tokens outside the preset list are stored as given; their hex form falls
/// back to the default accent.
#[utoipa::path(
    put,
    path = "/api/settings/accent",
    tag = "settings",
    request_body = AccentColorRequest,
    params(("X-Admin-Session" = String, Header, description = "Editor session token")),
    responses(
        (status = 200, description = "Updated settings", body = inline(SuccessResponse<Settings>)),
        (status = 401, description = "Editor is locked", body = ErrorResponse),
        (status = 503, description = "Content not loaded or not saved", body = ErrorResponse),
    )
)]
#[put("/api/settings/accent")]
pub async fn set_accent_color_handler(
    _editor: AdminEditor,
    req: web::Json<AccentColorRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.content.set_accent_color(&req.color).await {
        Ok(settings) => ApiResponse::success(settings),
        Err(e) => store_error_response(&e),
    }
}
