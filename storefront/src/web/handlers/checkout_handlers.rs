// modoya_storefront/src/web/handlers/checkout_handlers.rs

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use modoya::{ContextData, OrderType, PipelineResult};
use serde_json::json;
use tracing::{info, instrument, warn};

use super::session_handlers::SessionId;
use crate::errors::AppError;
use crate::pipelines::contexts::CheckoutCtxData;
use crate::state::AppState;

pub const CART_LOCATION: &str = "/api/v1/cart";

#[instrument(
    name = "handler::checkout",
    skip(app_state, path),
    fields(session_id = %session.as_str(), order_type = %path.as_ref())
)]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let order_type: OrderType = path.parse().map_err(AppError::Validation)?;
  info!("Checkout attempt for session {} ({}).", session.as_str(), order_type);

  let ctx_data = ContextData::new(CheckoutCtxData::new(
    app_state.get_ref().clone(),
    session.0.clone(),
    order_type,
  ));

  match app_state.workflows.run(ctx_data.clone()).await {
    Ok(PipelineResult::Completed) => {
      let guard = ctx_data.read();
      let order = guard.order.as_ref().ok_or_else(|| {
        warn!(
          "Checkout pipeline completed for session {} but no order was recorded.",
          session.as_str()
        );
        AppError::Internal("Checkout completed, but order details are unavailable.".to_string())
      })?;

      Ok(HttpResponse::Ok().json(json!({
          "message": "Checkout successful.",
          "order": order,
          "remainingCartEntries": guard.remaining_entries,
      })))
    }
    Ok(PipelineResult::Stopped) => {
      // Nothing of this order type in the cart: back to the cart, no order.
      info!(
        "Checkout for session {} had no {} entries; redirecting to cart.",
        session.as_str(),
        order_type
      );
      Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, CART_LOCATION))
        .finish())
    }
    Err(app_err) => {
      warn!("Checkout pipeline failed for session {}: {:?}", session.as_str(), app_err);
      Err(app_err)
    }
  }
}
