use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

use crate::modules::content::application::StorePhase;
use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    content: StorePhase,
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - Ready once content has been loaded from persistence
#[get("/ready")]
pub async fn readiness(data: web::Data<AppState>) -> impl Responder {
    let phase = data.content.phase();

    if phase == StorePhase::Populated {
        HttpResponse::Ok().json(ReadinessResponse {
            status: "ok",
            content: phase,
        })
    } else {
        HttpResponse::ServiceUnavailable().json(ReadinessResponse {
            status: "unhealthy",
            content: phase,
        })
    }
}
