use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("No text found: {0}")]
    NoTextFound(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("AI generation error: {0}")]
    AIGenerationError(String),

    #[error("Malformed AI response: {0}")]
    MalformedAIResponse(String),

    #[error("Quiz schema violation: {0}")]
    SchemaViolation(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingInput(_) => "MISSING_INPUT",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            AppError::NoTextFound(_) => "NO_TEXT_FOUND",
            AppError::ExtractionFailed(_) => "EXTRACTION_FAILED",
            AppError::AIGenerationError(_) => "AI_GENERATION_ERROR",
            AppError::MalformedAIResponse(_) => "MALFORMED_AI_RESPONSE",
            AppError::SchemaViolation(_) => "SCHEMA_VIOLATION",
            AppError::ExportError(_) => "EXPORT_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::NoTextFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ExtractionFailed(_)
            | AppError::AIGenerationError(_)
            | AppError::MalformedAIResponse(_)
            | AppError::SchemaViolation(_)
            | AppError::ExportError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(format!("I/O error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::SchemaViolation(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
