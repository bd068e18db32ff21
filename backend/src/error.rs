use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::services::brd::gemini::LlmError;
use crate::services::export::pdf::PdfError;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("LLM service failed: {0}")]
    Llm(#[from] LlmError),

    #[error("PDF generation failed: {0}")]
    Pdf(PdfError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// An undecodable image is the caller's fault; only assembly failures are 503.
impl From<PdfError> for ApiError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::Base64(_) | PdfError::Image(_) | PdfError::EmptyImage => {
                ApiError::Validation(format!("Invalid document image: {}", err))
            }
            other => ApiError::Pdf(other),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Llm(_) => StatusCode::BAD_GATEWAY,
            ApiError::Pdf(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}
