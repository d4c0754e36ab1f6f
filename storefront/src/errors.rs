// modoya_storefront/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use modoya::ModoyaError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Session Required: {0}")]
  Session(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Style Analysis Failed: {0}")]
  StyleAnalysis(String),

  #[error("Modoya Workflow Error: {source}")]
  Workflow {
    #[from]
    source: ModoyaError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),

  // A pipeline stopped where the calling handler expected it to complete.
  #[error("Pipeline execution was halted by a handler.")]
  PipelineHaltedByHandler,
}

// Handler code that bubbles up anyhow errors keeps any ModoyaError it wraps.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<ModoyaError>() {
      Ok(modoya_err) => AppError::from_domain(modoya_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl AppError {
  /// Lifts library failures that carry a clear client-facing meaning into
  /// the matching variant; everything else stays a workflow error.
  pub fn from_domain(err: ModoyaError) -> Self {
    match err {
      ModoyaError::UnknownItem { item_id } => AppError::NotFound(format!("Item with ID {} not found.", item_id)),
      ModoyaError::MissingField { item, .. } => AppError::NotFound(format!("Item {} not found.", item)),
      ModoyaError::InvalidUpload(m) => AppError::Validation(m),
      ModoyaError::ClassifierFailure(m) | ModoyaError::MalformedStyleAnalysis(m) => AppError::StyleAnalysis(m),
      other => AppError::Workflow { source: other },
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::Session(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::StyleAnalysis(_) => StatusCode::BAD_GATEWAY,
      AppError::PipelineHaltedByHandler => StatusCode::CONFLICT,
      AppError::Workflow { source } => match source {
        ModoyaError::UnknownItem { .. } | ModoyaError::MissingField { .. } => StatusCode::NOT_FOUND,
        ModoyaError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
        ModoyaError::ClassifierFailure(_) | ModoyaError::MalformedStyleAnalysis(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
      },
      AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    let body = match self {
      AppError::Validation(m) | AppError::Session(m) | AppError::NotFound(m) => json!({"error": m}),
      AppError::StyleAnalysis(m) => json!({"error": "Style analysis failed", "detail": m}),
      AppError::Config(m) => json!({"error": "Configuration issue", "detail": m}),
      AppError::Workflow { source } => {
        tracing::error!(modoya_error_source = ?source, "Workflow error details");
        json!({"error": "Workflow processing error", "detail": source.to_string()})
      }
      AppError::Internal(m) => json!({"error": "An internal error occurred", "detail": m}),
      AppError::PipelineHaltedByHandler => json!({"error": "Process halted as expected by business logic."}),
    };
    HttpResponse::build(self.status_code()).json(body)
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
