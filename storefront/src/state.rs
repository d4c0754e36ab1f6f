// modoya_storefront/src/state.rs
use crate::config::AppConfig;
use crate::errors::AppError;
use modoya::{Catalog, CartStore, StyleClassifier, Workflows};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<Catalog>,
  pub carts: Arc<CartStore>,
  pub workflows: Arc<Workflows<AppError>>,
  pub classifier: Arc<dyn StyleClassifier>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// State with an empty cart store and no pipelines registered yet.
  pub fn new(config: Arc<AppConfig>, catalog: Arc<Catalog>, classifier: Arc<dyn StyleClassifier>) -> Self {
    Self {
      catalog,
      carts: Arc::new(CartStore::new()),
      workflows: Arc::new(Workflows::new()),
      classifier,
      config,
    }
  }
}
