// modoya_storefront/src/pipelines/mod.rs

//! Defines and registers the request workflows of the storefront.

use crate::errors::AppError;
use crate::state::AppState;
use modoya::Workflows;
use std::sync::Arc;

pub mod contexts; // Underlying data structs the pipelines run over

pub mod cart_pipeline;
pub mod checkout_pipeline;
pub mod style_match_pipeline;

/// Registers every pipeline with the workflow registry. Called once at startup.
pub fn register_all_pipelines(workflows: &Arc<Workflows<AppError>>, app_state: &AppState) {
  tracing::info!("Registering storefront pipelines...");

  cart_pipeline::register_add_to_cart_pipeline(workflows, app_state);
  checkout_pipeline::register_checkout_pipeline(workflows, app_state);
  style_match_pipeline::register_style_match_pipeline(workflows, app_state);

  tracing::info!("All storefront pipelines registered.");
}
