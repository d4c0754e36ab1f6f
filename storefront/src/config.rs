// modoya_storefront/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  // Directory holding the item sidecars and their images.
  pub catalog_dir: PathBuf,

  // Mock vision collaborator
  pub mock_vision_style: Option<String>,
  pub mock_vision_latency_ms: u64,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|var_name| env::var(var_name).ok())
  }

  /// Builds the config from any variable source; unset variables take their defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| lookup(var_name).filter(|value| !value.trim().is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let catalog_dir = PathBuf::from(get_env("CATALOG_DIR").unwrap_or_else(|| "Pictures".to_string()));

    let mock_vision_style = get_env("MOCK_VISION_STYLE").map(|style| style.trim().to_string());
    let mock_vision_latency_ms = get_env("MOCK_VISION_LATENCY_MS")
      .unwrap_or_else(|| "40".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid MOCK_VISION_LATENCY_MS: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");
    tracing::debug!(
      server_host = %server_host,
      server_port,
      catalog_dir = %catalog_dir.display(),
      mock_vision_style = ?mock_vision_style,
      mock_vision_latency_ms,
      "Loaded config details"
    );

    Ok(Self {
      server_host,
      server_port,
      catalog_dir,
      mock_vision_style,
      mock_vision_latency_ms,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
