use actix_web::HttpResponse;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::modules::content::application::{ContentStoreError, MutationOutcome};
use crate::modules::content::domain::entities::PortfolioContent;
use crate::modules::content::domain::policies::accent_hex;
use crate::shared::api::ApiResponse;

/// Readable content plus the hex form of the accent color.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    #[serde(flatten)]
    pub content: PortfolioContent,
    #[schema(example = "ff5722")]
    pub accent_hex: String,
}

impl From<PortfolioContent> for ContentResponse {
    fn from(content: PortfolioContent) -> Self {
        let accent_hex = accent_hex(&content.settings.accent_color).to_string();
        Self {
            content,
            accent_hex,
        }
    }
}

/// Outcome of a mutation that may be a no-op.
#[derive(Serialize, ToSchema)]
pub struct MutationResponse {
    /// `false` when the request changed nothing (unknown key, duplicate, blank input)
    #[schema(example = true)]
    pub applied: bool,
}

impl From<MutationOutcome> for MutationResponse {
    fn from(outcome: MutationOutcome) -> Self {
        Self {
            applied: outcome.is_applied(),
        }
    }
}

pub fn store_error_response(err: &ContentStoreError) -> HttpResponse {
    match err {
        ContentStoreError::NotInitialized => {
            warn!("Content mutation rejected: store not initialized");
            ApiResponse::service_unavailable("CONTENT_NOT_READY", "Content is not loaded yet")
        }
        ContentStoreError::Persistence(e) => {
            error!(error = %e, "Content change could not be saved");
            ApiResponse::service_unavailable("PERSISTENCE_UNAVAILABLE", &e.to_string())
        }
    }
}
