use actix_multipart::Multipart;
use actix_web::{error, post, web, HttpResponse};
use futures_util::StreamExt;
use meetbrief_common::MeetbriefError;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{GenerateResponse, LinkRequest, TextRequest};
use crate::workflow::Submission;

/// Largest accepted upload
pub const MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

/// Summarize an uploaded transcript document or media file
#[post("/api/summarize")]
pub async fn summarize_upload(
    mut payload: Multipart,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let mut upload = None;

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| {
            ApiError::from(MeetbriefError::malformed_input(format!("Invalid multipart body: {}", e)))
        })?;

        let content_disposition = field.content_disposition();
        if content_disposition.get_name() != Some("file") {
            continue;
        }
        let filename = content_disposition.get_filename().map(str::to_string);
        let content_type = field.content_type().map(|m| m.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| {
                ApiError::from(MeetbriefError::malformed_input(format!("Upload interrupted: {}", e)))
            })?;
            if bytes.len() + data.len() > MAX_UPLOAD_BYTES {
                return Err(error::ErrorPayloadTooLarge(format!(
                    "Upload exceeds {} bytes",
                    MAX_UPLOAD_BYTES
                )));
            }
            bytes.extend_from_slice(&data);
        }

        upload = Some(Submission::from_upload(filename, content_type, bytes));
    }

    let Some(submission) = upload else {
        return Ok(HttpResponse::BadRequest().body("No file uploaded"));
    };

    let response = state
        .workflow
        .execute(submission)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(GenerateResponse { response }))
}

/// Transcribe and summarize a meeting link
#[post("/api/link")]
pub async fn summarize_link(
    req: web::Json<LinkRequest>,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let submission = Submission::from_message_text(&req.meeting_link).map_err(ApiError::from)?;

    let response = state
        .workflow
        .execute(submission)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(GenerateResponse { response }))
}

/// Summarize transcript text sent in the request body
#[post("/api/text")]
pub async fn summarize_text(
    req: web::Json<TextRequest>,
    state: web::Data<Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let response = state
        .workflow
        .execute(Submission::Text(req.into_inner().text))
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(GenerateResponse { response }))
}
