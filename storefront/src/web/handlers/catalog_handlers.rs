// modoya_storefront/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use modoya::{filter_items, Catalog, FilterCriteria};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_catalog", skip(app_state, query_params), fields(criteria = ?query_params.0))]
pub async fn list_catalog_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<FilterCriteria>,
) -> Result<HttpResponse, AppError> {
  let criteria = query_params.into_inner();
  let matches = filter_items(app_state.catalog.items(), &criteria);
  let items = Catalog::listings(matches);

  info!("Catalog listing: {} item(s) match.", items.len());

  Ok(HttpResponse::Ok().json(json!({
      "count": items.len(),
      "items": items,
  })))
}

#[instrument(name = "handler::catalog_options", skip(app_state))]
pub async fn catalog_options_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.catalog.options()))
}

#[instrument(name = "handler::get_item", skip(app_state, path), fields(item_id = %path.as_ref()))]
pub async fn get_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();

  let item = app_state.catalog.get(item_id).ok_or_else(|| {
    warn!("Item with ID {} not found.", item_id);
    AppError::NotFound(format!("Item with ID {} not found.", item_id))
  })?;

  // An item that cannot be priced is hidden from listings, so it is hidden here too.
  let listing = item.listing().map_err(|e| {
    warn!("Item {} cannot be displayed: {}", item_id, e);
    AppError::NotFound(format!("Item with ID {} not found.", item_id))
  })?;

  Ok(HttpResponse::Ok().json(json!({ "item": listing })))
}
