// modoya_storefront/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use modoya::{CartAction, CartLine, CartSummary, ContextData, PipelineResult, UpdateOutcome};
use serde_json::json;
use tracing::{info, instrument, warn};

use super::session_handlers::SessionId;
use crate::errors::AppError;
use crate::pipelines::contexts::AddToCartCtxData;
use crate::state::AppState;

fn cart_body(lines: Vec<CartLine>) -> serde_json::Value {
  let summary = CartSummary::of(&lines);
  json!({ "lines": lines, "summary": summary })
}

#[instrument(name = "handler::view_cart", skip(app_state), fields(session_id = %session.as_str()))]
pub async fn view_cart_handler(app_state: web::Data<AppState>, session: SessionId) -> Result<HttpResponse, AppError> {
  let lines = app_state.carts.read(session.as_str(), &app_state.catalog);
  Ok(HttpResponse::Ok().json(cart_body(lines)))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, path),
    fields(session_id = %session.as_str(), item_id = %path.as_ref())
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();
  info!("Add to cart attempt for session {}, item {}", session.as_str(), item_id);

  let ctx_data = ContextData::new(AddToCartCtxData::new(
    app_state.get_ref().clone(),
    session.0.clone(),
    item_id,
  ));

  match app_state.workflows.run(ctx_data.clone()).await {
    Ok(PipelineResult::Completed) => {
      let guard = ctx_data.read();
      let entry = guard.cart_entry.ok_or_else(|| {
        warn!(
          "Add to Cart pipeline completed for session {} but no cart entry was recorded.",
          session.as_str()
        );
        AppError::Internal("Cart update completed, but entry details are unavailable.".to_string())
      })?;

      Ok(HttpResponse::Ok().json(json!({
          "message": "Item added to cart.",
          "itemId": item_id,
          "series": guard.series_for_response,
          "entry": entry,
      })))
    }
    Ok(PipelineResult::Stopped) => {
      warn!("Add to Cart pipeline for session {} was stopped by a handler.", session.as_str());
      Err(AppError::PipelineHaltedByHandler)
    }
    Err(app_err) => {
      warn!("Add to Cart pipeline failed for session {}: {:?}", session.as_str(), app_err);
      Err(app_err)
    }
  }
}

fn outcome_response(
  app_state: &AppState,
  session: &SessionId,
  item_id: u64,
  outcome: UpdateOutcome,
) -> Result<HttpResponse, AppError> {
  // NotInCart and Rejected leave the cart unchanged and are not errors.
  match outcome {
    UpdateOutcome::NotInCart => info!("Item {} is not in the cart; nothing to update.", item_id),
    UpdateOutcome::Rejected => info!("Duration update for item {} rejected; previous value kept.", item_id),
    UpdateOutcome::Applied | UpdateOutcome::Removed => {}
  }
  let lines = app_state.carts.read(session.as_str(), &app_state.catalog);
  let mut body = cart_body(lines);
  body["outcome"] = json!(outcome);
  Ok(HttpResponse::Ok().json(body))
}

#[instrument(
    name = "handler::update_cart_item",
    skip(app_state, path, action),
    fields(session_id = %session.as_str(), item_id = %path.as_ref(), action = ?action.0)
)]
pub async fn update_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
  action: web::Json<CartAction>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();
  let outcome = app_state.carts.update(session.as_str(), item_id, action.into_inner());
  outcome_response(&app_state, &session, item_id, outcome)
}

#[instrument(name = "handler::remove_cart_item", skip(app_state, path), fields(session_id = %session.as_str(), item_id = %path.as_ref()))]
pub async fn remove_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();
  let outcome = app_state.carts.update(session.as_str(), item_id, CartAction::Remove);
  outcome_response(&app_state, &session, item_id, outcome)
}

#[instrument(name = "handler::clear_cart", skip(app_state), fields(session_id = %session.as_str()))]
pub async fn clear_cart_handler(app_state: web::Data<AppState>, session: SessionId) -> Result<HttpResponse, AppError> {
  app_state.carts.clear(session.as_str());
  Ok(HttpResponse::Ok().json(cart_body(Vec::new())))
}
