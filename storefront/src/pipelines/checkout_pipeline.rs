// modoya_storefront/src/pipelines/checkout_pipeline.rs
use crate::errors::AppError;
use crate::pipelines::contexts::CheckoutCtxData;
use crate::state::AppState;
use modoya::checkout::partition;
use modoya::pricing::format_amount;
use modoya::{checkout_session, ContextData, Pipeline, PipelineControl, Workflows};
use std::sync::Arc;
use tracing::{info, warn};

pub fn register_checkout_pipeline(workflows: &Arc<Workflows<AppError>>, _app_state: &AppState) {
  let mut p = Pipeline::<CheckoutCtxData, AppError>::new(&[
    ("resolve_session_cart", false, None),
    ("settle_session_cart", false, None),
    ("log_order_confirmation", true, None), // Optional step
  ]);

  // Step 1: Read the cart (pruning stale entries) and stop early when nothing
  // of the requested order type is in it.
  p.on_root("resolve_session_cart", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (session_id, order_type, catalog, carts) = {
        let guard = ctx_data.read();
        (
          guard.session_id.clone(),
          guard.order_type,
          guard.app_state.catalog.clone(),
          guard.app_state.carts.clone(),
        )
      };

      let lines = carts.read(&session_id, &catalog);
      let (matching, retained) = partition(lines, order_type);
      info!(
        "Checkout Pipeline (Session {}): {} {} line(s) to charge, {} retained.",
        session_id,
        matching.len(),
        order_type,
        retained.len()
      );

      ctx_data.write().matching_line_count = matching.len();
      if matching.is_empty() {
        info!(
          "Checkout Pipeline (Session {}): Nothing to check out for {}.",
          session_id, order_type
        );
        return Ok::<_, AppError>(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  });

  // Step 2: Build the order and drop its entries from the cart in one locked
  // operation on the session's cart.
  p.on_root("settle_session_cart", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (session_id, order_type, catalog, carts) = {
        let guard = ctx_data.read();
        (
          guard.session_id.clone(),
          guard.order_type,
          guard.app_state.catalog.clone(),
          guard.app_state.carts.clone(),
        )
      };

      let Some(order) = checkout_session(&carts, &session_id, &catalog, order_type) else {
        // Another request emptied the partition after step 1.
        warn!(
          "Checkout Pipeline (Session {}): {} entries disappeared before settling.",
          session_id, order_type
        );
        return Ok(PipelineControl::Stop);
      };

      let remaining = carts.snapshot(&session_id).len();
      let mut guard = ctx_data.write();
      guard.order = Some(order);
      guard.remaining_entries = remaining;
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  // Step 3: Confirmation log line.
  p.on_root("log_order_confirmation", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let guard = ctx_data.read();
      match &guard.order {
        Some(order) => {
          if order.lines.len() != guard.matching_line_count {
            warn!(
              "Checkout Pipeline (Session {}): Cart changed while settling, {} line(s) seen but {} charged.",
              guard.session_id,
              guard.matching_line_count,
              order.lines.len()
            );
          }
          info!(
            "Checkout Pipeline (Session {}): Order {} confirmed, {} for {} line(s). {} entr(ies) left in cart.",
            guard.session_id,
            order.id,
            format_amount(order.total),
            order.lines.len(),
            guard.remaining_entries
          )
        }
        None => warn!("Checkout Pipeline (Session {}): No order to confirm.", guard.session_id),
      }
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  workflows.register_pipeline(p);
  info!("Checkout pipeline registered.");
}
