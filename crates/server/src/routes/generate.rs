use actix_web::{post, web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{GenerateForm, GenerateResponse};

/// Send a raw prompt to the model
#[post("/api/generate")]
pub async fn generate(
    form: web::Form<GenerateForm>,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    info!("Raw generate request - Prompt length: {}", form.prompt.len());

    let response = state
        .llm
        .generate(&form.prompt)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(GenerateResponse { response }))
}
