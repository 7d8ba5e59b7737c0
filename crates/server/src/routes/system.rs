use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use crate::state::AppState;
use crate::types::{HealthResponse, MessageResponse};

/// Service banner
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Meetbrief API Service".to_string(),
    })
}

/// Liveness check, reports the summarization model
#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        model: state.workflow.model().to_string(),
    })
}
