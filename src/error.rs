use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::data_structs::responses::error_response::ErrorResponse;
use crate::store::StoreError;

/// Everything that can go wrong while handling one enrollment delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("request body is not valid json: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("required field `{path}` is missing")]
    MissingField { path: &'static str },

    #[error("field `{path}` must be a string")]
    InvalidField { path: &'static str },

    #[error("field `{path}` is {actual} characters long, the limit is {max}")]
    FieldTooLong { path: &'static str, max: usize, actual: usize },

    #[error("enrollment store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl WebhookError {
    pub fn code(&self) -> &'static str {
        match self {
            WebhookError::MalformedPayload(_) => "malformed_payload",
            WebhookError::MissingField { .. } => "missing_field",
            WebhookError::InvalidField { .. } => "invalid_field",
            WebhookError::FieldTooLong { .. } => "field_too_long",
            WebhookError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl ResponseError for WebhookError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            WebhookError::MissingField { .. }
            | WebhookError::InvalidField { .. }
            | WebhookError::FieldTooLong { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            WebhookError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // don't leak driver details to the caller, the log has them
        let message = match self {
            WebhookError::StoreUnavailable(_) => "enrollment store unavailable".to_string(),
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.code(), message))
    }
}
