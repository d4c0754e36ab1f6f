// modoya/src/checkout.rs

//! Checking out one order type from a cart.

use crate::cart::{Cart, CartLine, CartStore, OrderType};
use crate::catalog::Catalog;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use tracing::{info, instrument};

/// Confirmation reference for an order.
///
/// Built from the UTC placement time and a random suffix. It is a display
/// reference only: two orders placed in the same second can collide, and it
/// carries no sequence or audit meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
  pub fn generate(placed_at: DateTime<Utc>, rng: &mut impl Rng) -> Self {
    let suffix: u32 = rng.random();
    OrderId(format!("MOD-{}-{:08x}", placed_at.format("%Y%m%d%H%M%S"), suffix))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for OrderId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Produced at checkout and returned to the caller; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: OrderId,
  pub order_type: OrderType,
  pub lines: Vec<CartLine>,
  pub total: u64,
  pub placed_at: DateTime<Utc>,
}

impl Order {
  /// `None` when `lines` is empty. Every line must already be of `order_type`.
  pub fn from_lines(order_type: OrderType, lines: Vec<CartLine>) -> Option<Self> {
    if lines.is_empty() {
      return None;
    }
    let placed_at = Utc::now();
    let total = lines.iter().map(|line| line.line_total).sum();
    Some(Self {
      id: OrderId::generate(placed_at, &mut rand::rng()),
      order_type,
      lines,
      total,
      placed_at,
    })
  }

  pub fn item_ids(&self) -> impl Iterator<Item = u64> + '_ {
    self.lines.iter().map(|line| line.item_id)
  }
}

/// Splits resolved lines into `(matching, other)` by order type, keeping order.
pub fn partition(lines: Vec<CartLine>, order_type: OrderType) -> (Vec<CartLine>, Vec<CartLine>) {
  lines.into_iter().partition(|line| line.order_type == order_type)
}

/// Checks out every `order_type` entry of `cart`.
///
/// Returns `None` and leaves the cart as it was (apart from the usual pruning
/// of unresolvable entries) when the cart or the requested partition is empty.
/// Otherwise the charged entries leave the cart and the rest stay.
pub fn checkout(cart: &mut Cart, catalog: &Catalog, order_type: OrderType) -> Option<Order> {
  let lines = cart.resolve(catalog);
  let (matching, _retained) = partition(lines, order_type);
  let order = Order::from_lines(order_type, matching)?;
  cart.remove_items(order.item_ids());
  Some(order)
}

/// [`checkout`] against one session of a [`CartStore`], under a single lock.
/// A session with no cart has nothing to check out.
#[instrument(name = "checkout::session", skip(store, catalog))]
pub fn checkout_session(
  store: &CartStore,
  session_id: &str,
  catalog: &Catalog,
  order_type: OrderType,
) -> Option<Order> {
  let order = store
    .with_cart(session_id, |cart| checkout(cart, catalog, order_type))
    .flatten()?;
  info!(order_id = %order.id, total = order.total, lines = order.lines.len(), "Order placed.");
  Some(order)
}
