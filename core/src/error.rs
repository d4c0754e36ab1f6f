// modoya/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModoyaError {
  // --- Catalog ---
  #[error("Catalog directory not found: {}", path.display())]
  CatalogNotFound { path: PathBuf },

  #[error("Failed to read catalog entry {}. Source: {source}", path.display())]
  CatalogIo {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Malformed item sidecar {}. Source: {source}", path.display())]
  MalformedRecord {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Item {item} is missing required field '{field}'")]
  MissingField { item: String, field: &'static str },

  #[error("No catalog item with id {item_id}")]
  UnknownItem { item_id: u64 },

  // --- Style matching ---
  #[error("Invalid style upload: {0}")]
  InvalidUpload(String),

  #[error("Style classifier failed: {0}")]
  ClassifierFailure(String),

  #[error("Malformed style analysis: {0}")]
  MalformedStyleAnalysis(String),

  // --- Workflow engine ---
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Type mismatch while dispatching context (expected {expected_type}, step: '{step_name}')")]
  TypeMismatch { step_name: String, expected_type: String },

  #[error("Configuration error for step '{step_name}': {message}")]
  ConfigurationError { step_name: String, message: String },
}

pub type ModoyaResult<T, E = ModoyaError> = std::result::Result<T, E>;
