// modoya_storefront/src/main.rs

mod config;
mod errors;
mod pipelines;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::services::vision_mock::MockVisionService;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use modoya::load_catalog;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting Modoya storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      std::process::exit(1);
    }
  };

  // The catalog is required; without it there is nothing to serve.
  let catalog = match load_catalog(&app_config.catalog_dir) {
    Ok(catalog) => {
      tracing::info!(
        "Catalog loaded from {} with {} item(s).",
        app_config.catalog_dir.display(),
        catalog.len()
      );
      Arc::new(catalog)
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to load the catalog.");
      std::process::exit(1);
    }
  };

  let classifier = Arc::new(MockVisionService::from_config(&app_config, &catalog));
  let app_state = AppState::new(app_config.clone(), catalog, classifier);

  pipelines::register_all_pipelines(&app_state.workflows, &app_state);

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
