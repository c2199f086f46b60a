use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

// Admin
use crate::modules::admin::adapter::incoming::web::routes::{
    AdminLoginRequest, AdminSessionResponse,
};

// Content
use crate::modules::content::adapter::incoming::web::routes::{
    AccentColorRequest, ResumeLinksRequest, ShowVideoRequest, VideoUrlRequest,
};
use crate::modules::content::adapter::incoming::web::{ContentResponse, MutationResponse};
use crate::modules::content::application::ports::incoming::{
    AchievementForm, CategoryForm, ProjectForm, SkillForm,
};
use crate::modules::content::domain::entities::{
    Achievement, AchievementCategory, Category, PortfolioContent, Project, Settings, Skill,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio Content API",
        version = "1.0.0",
        description = "Portfolio content store: public reads, live updates and the editor surface",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Admin endpoints
        crate::modules::admin::adapter::incoming::web::routes::login_admin_handler,
        crate::modules::admin::adapter::incoming::web::routes::logout_admin_handler,

        // Content endpoints
        crate::modules::content::adapter::incoming::web::routes::get_content_handler,
        crate::modules::content::adapter::incoming::web::routes::content_events_handler,

        // Project endpoints
        crate::modules::content::adapter::incoming::web::routes::create_project_handler,
        crate::modules::content::adapter::incoming::web::routes::update_project_handler,
        crate::modules::content::adapter::incoming::web::routes::delete_project_handler,

        // Skill endpoints
        crate::modules::content::adapter::incoming::web::routes::add_skill_handler,
        crate::modules::content::adapter::incoming::web::routes::delete_skill_handler,
        crate::modules::content::adapter::incoming::web::routes::add_category_handler,

        // Achievement endpoints
        crate::modules::content::adapter::incoming::web::routes::create_achievement_handler,
        crate::modules::content::adapter::incoming::web::routes::update_achievement_handler,
        crate::modules::content::adapter::incoming::web::routes::delete_achievement_handler,

        // Settings endpoints
        crate::modules::content::adapter::incoming::web::routes::update_video_url_handler,
        crate::modules::content::adapter::incoming::web::routes::update_resume_links_handler,
        crate::modules::content::adapter::incoming::web::routes::set_show_video_handler,
        crate::modules::content::adapter::incoming::web::routes::set_accent_color_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<ContentResponse>,
            ErrorResponse,
            ErrorDetail,
            MutationResponse,

            // Admin DTOs
            AdminLoginRequest,
            AdminSessionResponse,

            // Content model
            ContentResponse,
            PortfolioContent,
            Project,
            Skill,
            Achievement,
            AchievementCategory,
            Category,
            Settings,

            // Editor forms
            ProjectForm,
            SkillForm,
            AchievementForm,
            CategoryForm,
            VideoUrlRequest,
            ResumeLinksRequest,
            ShowVideoRequest,
            AccentColorRequest
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "admin", description = "Editor unlock and lock"),
        (name = "content", description = "Public content reads and live updates"),
        (name = "projects", description = "Project management endpoints"),
        (name = "skills", description = "Skill and skill category endpoints"),
        (name = "achievements", description = "Achievement management endpoints"),
        (name = "settings", description = "Site settings endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "AdminSession",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-Admin-Session",
                    "Token returned by POST /api/admin/session",
                ))),
            )
        }
    }
}
