// modoya/src/cart.rs

//! Per-session carts.
//!
//! A cart maps catalog item ids to a [`CartEntry`]. Entries whose item no
//! longer resolves in the catalog are dropped the next time the cart is read.

use crate::catalog::{Catalog, Item};
use crate::error::{ModoyaError, ModoyaResult};
use crate::pricing;
use dashmap::DashMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

pub const DEFAULT_RENTAL_MONTHS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
  Rent,
  Buy,
}

impl fmt::Display for OrderType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OrderType::Rent => f.write_str("RENT"),
      OrderType::Buy => f.write_str("BUY"),
    }
  }
}

impl FromStr for OrderType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "RENT" => Ok(OrderType::Rent),
      "BUY" => Ok(OrderType::Buy),
      other => Err(format!("unknown order type '{}'", other)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
  pub order_type: OrderType,
  /// Kept while the entry is BUY so switching back to RENT restores it.
  pub duration_months: u32,
}

impl Default for CartEntry {
  fn default() -> Self {
    Self {
      order_type: OrderType::Rent,
      duration_months: DEFAULT_RENTAL_MONTHS,
    }
  }
}

/// An in-place change to one cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CartAction {
  Remove,
  /// `None` when the request carried no usable whole number.
  UpdateDuration {
    #[serde(default, deserialize_with = "lenient_months")]
    duration: Option<i64>,
  },
  SetRent,
  SetBuy,
}

/// Integers and integer strings are read; anything else becomes `None` so the
/// update is rejected rather than failing the request.
fn lenient_months<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(match value {
    Value::Number(n) => n.as_i64(),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
  Applied,
  Removed,
  /// The requested duration was not a positive month count; nothing changed.
  Rejected,
  NotInCart,
}

/// A cart entry joined with its catalog item and priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub item_id: u64,
  pub series: String,
  pub category: String,
  pub style: String,
  pub order_type: OrderType,
  pub duration_months: u32,
  pub monthly_rent: u64,
  pub buyout_price: u64,
  /// RENT: monthly rent times duration. BUY: buyout price.
  pub line_total: u64,
}

impl CartLine {
  /// Fails with `MissingField` for an item that has no listing, and so no price.
  pub fn new(item_id: u64, item: &Item, entry: CartEntry) -> ModoyaResult<Self> {
    let listing = item.listing()?;
    let line_total = match entry.order_type {
      OrderType::Rent => pricing::rental_total(listing.monthly_rent, entry.duration_months),
      OrderType::Buy => listing.buyout_price,
    };
    Ok(Self {
      item_id,
      series: listing.series,
      category: listing.category,
      style: listing.style,
      order_type: entry.order_type,
      duration_months: entry.duration_months,
      monthly_rent: listing.monthly_rent,
      buyout_price: listing.buyout_price,
      line_total,
    })
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
  pub line_count: usize,
  pub monthly_rent: u64,
  pub rent_total: u64,
  pub buy_total: u64,
}

impl CartSummary {
  pub fn of(lines: &[CartLine]) -> Self {
    lines.iter().fold(
      CartSummary {
        line_count: lines.len(),
        ..Default::default()
      },
      |mut summary, line| {
        match line.order_type {
          OrderType::Rent => {
            summary.monthly_rent += line.monthly_rent;
            summary.rent_total += line.line_total;
          }
          OrderType::Buy => summary.buy_total += line.line_total,
        }
        summary
      },
    )
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
  entries: BTreeMap<u64, CartEntry>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn get(&self, item_id: u64) -> Option<&CartEntry> {
    self.entries.get(&item_id)
  }

  pub fn entries(&self) -> impl Iterator<Item = (u64, &CartEntry)> {
    self.entries.iter().map(|(id, entry)| (*id, entry))
  }

  /// Puts `item_id` in the cart as a 12-month rental, replacing any entry it
  /// already had. The id must exist in `catalog` and the item must be priceable.
  pub fn add(&mut self, catalog: &Catalog, item_id: u64) -> ModoyaResult<CartEntry> {
    let item = catalog.get(item_id).ok_or(ModoyaError::UnknownItem { item_id })?;
    item.listing()?;
    let entry = CartEntry::default();
    self.entries.insert(item_id, entry);
    Ok(entry)
  }

  pub fn update(&mut self, item_id: u64, action: CartAction) -> UpdateOutcome {
    match action {
      CartAction::Remove => match self.entries.remove(&item_id) {
        Some(_) => UpdateOutcome::Removed,
        None => UpdateOutcome::NotInCart,
      },
      CartAction::UpdateDuration { duration } => self.edit(item_id, |entry| match duration.map(u32::try_from) {
        Some(Ok(months)) if months > 0 => {
          entry.duration_months = months;
          UpdateOutcome::Applied
        }
        _ => UpdateOutcome::Rejected,
      }),
      CartAction::SetRent => self.edit(item_id, |entry| {
        entry.order_type = OrderType::Rent;
        UpdateOutcome::Applied
      }),
      CartAction::SetBuy => self.edit(item_id, |entry| {
        entry.order_type = OrderType::Buy;
        UpdateOutcome::Applied
      }),
    }
  }

  fn edit(&mut self, item_id: u64, f: impl FnOnce(&mut CartEntry) -> UpdateOutcome) -> UpdateOutcome {
    self.entries.get_mut(&item_id).map_or(UpdateOutcome::NotInCart, f)
  }

  pub fn remove(&mut self, item_id: u64) -> bool {
    self.entries.remove(&item_id).is_some()
  }

  pub fn remove_items(&mut self, item_ids: impl IntoIterator<Item = u64>) {
    for item_id in item_ids {
      self.entries.remove(&item_id);
    }
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  /// Priced lines for every entry that still resolves in `catalog`.
  /// Entries that do not resolve, or can no longer be priced, are removed
  /// from the cart.
  pub fn resolve(&mut self, catalog: &Catalog) -> Vec<CartLine> {
    let mut lines = Vec::with_capacity(self.entries.len());
    self.entries.retain(|item_id, entry| {
      let Some(item) = catalog.get(*item_id) else {
        warn!(item_id = *item_id, "Pruning cart entry for an item no longer in the catalog.");
        return false;
      };
      match CartLine::new(*item_id, item, *entry) {
        Ok(line) => {
          lines.push(line);
          true
        }
        Err(e) => {
          warn!(item_id = *item_id, error = %e, "Pruning cart entry for an item that cannot be priced.");
          false
        }
      }
    });
    lines
  }
}

/// Carts for every live session, keyed by session id.
///
/// Each call locks only the caller's session entry, and only for the
/// duration of the call.
#[derive(Debug, Default)]
pub struct CartStore {
  carts: DashMap<String, Cart>,
}

impl CartStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn session_count(&self) -> usize {
    self.carts.len()
  }

  /// Runs `f` against the session's cart, creating an empty one if needed.
  /// Only adding to a cart goes through here.
  fn with_new_or_existing_cart<R>(&self, session_id: &str, f: impl FnOnce(&mut Cart) -> R) -> R {
    let mut cart = self.carts.entry(session_id.to_string()).or_default();
    f(cart.value_mut())
  }

  /// Runs `f` against the session's cart if it has one. A cart left empty
  /// afterwards is dropped from the store.
  pub fn with_cart<R>(&self, session_id: &str, f: impl FnOnce(&mut Cart) -> R) -> Option<R> {
    let result = {
      let mut cart = self.carts.get_mut(session_id)?;
      f(cart.value_mut())
    }; // shard lock released before remove_if takes it again
    if self.carts.remove_if(session_id, |_, cart| cart.is_empty()).is_some() {
      debug!(session_id, "Dropped empty cart.");
    }
    Some(result)
  }

  pub fn snapshot(&self, session_id: &str) -> Cart {
    self
      .carts
      .get(session_id)
      .map(|cart| cart.value().clone())
      .unwrap_or_default()
  }

  pub fn add(&self, session_id: &str, catalog: &Catalog, item_id: u64) -> ModoyaResult<CartEntry> {
    let entry = self.with_new_or_existing_cart(session_id, |cart| cart.add(catalog, item_id));
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        self.carts.remove_if(session_id, |_, cart| cart.is_empty());
        return Err(e);
      }
    };
    info!(session_id, item_id, "Item added to cart.");
    Ok(entry)
  }

  pub fn update(&self, session_id: &str, item_id: u64, action: CartAction) -> UpdateOutcome {
    let outcome = self
      .with_cart(session_id, |cart| cart.update(item_id, action))
      .unwrap_or(UpdateOutcome::NotInCart);
    debug!(session_id, item_id, ?action, ?outcome, "Cart entry updated.");
    outcome
  }

  pub fn clear(&self, session_id: &str) {
    self.carts.remove(session_id);
    info!(session_id, "Cart cleared.");
  }

  /// Self-healing read; see [`Cart::resolve`]. An unknown session reads as
  /// an empty cart and is not recorded.
  pub fn read(&self, session_id: &str, catalog: &Catalog) -> Vec<CartLine> {
    self
      .with_cart(session_id, |cart| cart.resolve(catalog))
      .unwrap_or_default()
  }
}
