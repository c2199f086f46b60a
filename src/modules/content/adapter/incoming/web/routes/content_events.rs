use crate::modules::content::adapter::incoming::web::ContentResponse;
use crate::AppState;
use actix_web::{get, http::header, web, HttpResponse};
use futures::stream;
use tokio::sync::watch;
use tracing::debug;

use crate::modules::content::domain::entities::PortfolioContent;

/// Stream content changes
///
/// Server-sent events. The first `content` event carries the current state;
/// every later one follows a change, local or from another client.
#[utoipa::path(
    get,
    path = "/api/content/events",
    tag = "content",
    responses(
        (status = 200, description = "Event stream of `content` events", body = String, content_type = "text/event-stream"),
    )
)]
#[get("/api/content/events")]
pub async fn content_events_handler(data: web::Data<AppState>) -> HttpResponse {
    let mut receiver = data.content.watch();
    receiver.mark_changed();
    debug!("Content event stream opened");

    let events = stream::unfold(receiver, |mut receiver| async move {
        receiver.changed().await.ok()?;
        let event = content_event(&receiver);
        Some((event, receiver))
    });

    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .content_type("text/event-stream")
        .streaming(events)
}

fn content_event(
    receiver: &watch::Receiver<PortfolioContent>,
) -> Result<web::Bytes, actix_web::Error> {
    let content = receiver.borrow().clone();
    let json = serde_json::to_string(&ContentResponse::from(content))
        .map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(web::Bytes::from(format!("event: content\ndata: {json}\n\n")))
}
