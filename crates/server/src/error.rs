use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use meetbrief_common::MeetbriefError;
use std::fmt;
use tracing::{error, warn};

use crate::types::ErrorResponse;

/// HTTP wrapper around workspace errors
#[derive(Debug)]
pub struct ApiError(pub MeetbriefError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MeetbriefError> for ApiError {
    fn from(err: MeetbriefError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if self.0.is_client_error() {
            warn!("Rejected request: {}", self.0);
        } else {
            error!("Request failed: {}", self.0);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.0.kind().to_string(),
            message: self.0.to_string(),
        })
    }
}
