// modoya_storefront/src/pipelines/cart_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::AddToCartCtxData;
use crate::state::AppState;
use modoya::{ContextData, Pipeline, PipelineControl, Workflows};
use std::sync::Arc;
use tracing::{info, warn};

pub fn register_add_to_cart_pipeline(workflows: &Arc<Workflows<AppError>>, _app_state: &AppState) {
  let mut p = Pipeline::<AddToCartCtxData, AppError>::new(&[
    ("validate_catalog_item", false, None),
    ("add_or_reset_cart_entry", false, None),
  ]);

  // Step 1: The item must exist in the catalog and carry a price.
  p.on_root("validate_catalog_item", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let (item_id, catalog) = {
        let guard = ctx_data.read();
        (guard.item_id, guard.app_state.catalog.clone())
      };

      let Some(item) = catalog.get(item_id) else {
        warn!("Add to Cart Pipeline: Item {} is not in the catalog.", item_id);
        return Err(AppError::NotFound(format!("Item with ID {} not found.", item_id)));
      };

      let listing = item.listing().map_err(|e| {
        warn!("Add to Cart Pipeline: Item {} cannot be priced: {}", item_id, e);
        AppError::NotFound(format!("Item with ID {} not found.", item_id))
      })?;

      info!("Add to Cart Pipeline: Item {} found in catalog.", item_id);
      ctx_data.write().series_for_response = Some(listing.series);
      Ok(PipelineControl::Continue)
    })
  });

  // Step 2: Insert, or reset to the default entry if already present.
  p.on_root("add_or_reset_cart_entry", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let (session_id, item_id, catalog, carts) = {
        let guard = ctx_data.read();
        (
          guard.session_id.clone(),
          guard.item_id,
          guard.app_state.catalog.clone(),
          guard.app_state.carts.clone(),
        )
      };

      let entry = carts
        .add(&session_id, &catalog, item_id)
        .map_err(AppError::from_domain)?;
      info!(
        "Add to Cart Pipeline: Session {} now has item {} as {} for {} months.",
        session_id, item_id, entry.order_type, entry.duration_months
      );
      ctx_data.write().cart_entry = Some(entry);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  workflows.register_pipeline(p);
  info!("Add to Cart pipeline registered.");
}
