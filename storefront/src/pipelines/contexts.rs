// modoya_storefront/src/pipelines/contexts.rs

//! Underlying data structs for the storefront pipelines.
//! Handlers receive these wrapped in `modoya::ContextData`.

use crate::state::AppState;
use modoya::{CartEntry, Order, OrderType, StyleImage, StyleMatch};

#[derive(Clone)]
pub struct AddToCartCtxData {
  pub app_state: AppState,
  pub session_id: String,
  pub item_id: u64,
  pub series_for_response: Option<String>,
  pub cart_entry: Option<CartEntry>,
}

impl AddToCartCtxData {
  pub fn new(app_state: AppState, session_id: String, item_id: u64) -> Self {
    Self {
      app_state,
      session_id,
      item_id,
      series_for_response: None,
      cart_entry: None,
    }
  }
}

#[derive(Clone)]
pub struct CheckoutCtxData {
  pub app_state: AppState,
  pub session_id: String,
  pub order_type: OrderType,
  // Lines that would be charged, as seen before settling.
  pub matching_line_count: usize,
  pub order: Option<Order>,
  pub remaining_entries: usize,
}

impl CheckoutCtxData {
  pub fn new(app_state: AppState, session_id: String, order_type: OrderType) -> Self {
    Self {
      app_state,
      session_id,
      order_type,
      matching_line_count: 0,
      order: None,
      remaining_entries: 0,
    }
  }
}

#[derive(Clone)]
pub struct StyleMatchCtxData {
  pub app_state: AppState,
  /// Base64 payloads as received, optionally in `data:` URL form.
  pub encoded_images: Vec<String>,
  pub images: Vec<StyleImage>,
  pub style_match: Option<StyleMatch>,
}

impl StyleMatchCtxData {
  pub fn new(app_state: AppState, encoded_images: Vec<String>) -> Self {
    Self {
      app_state,
      encoded_images,
      images: Vec::new(),
      style_match: None,
    }
  }
}
