// modoya/src/catalog/mod.rs

//! The in-memory furniture catalog. Loaded once at startup, never mutated.

pub mod item;
pub mod loader;

pub use item::{Item, ItemListing, ItemRecord};
pub use loader::load_catalog;

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

/// Placeholder used in [`CatalogOptions`] for items lacking the field.
pub const MISSING_OPTION: &str = "N/A";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
  items: Vec<Item>,
}

/// Sorted distinct values per filterable field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogOptions {
  pub style: Vec<String>,
  pub color: Vec<String>,
  pub season: Vec<String>,
  pub category: Vec<String>,
}

impl Catalog {
  pub fn from_items(items: Vec<Item>) -> Self {
    Self { items }
  }

  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// First item whose `row_id` equals `item_id`.
  pub fn get(&self, item_id: u64) -> Option<&Item> {
    self.items.iter().find(|item| item.id() == Some(item_id))
  }

  /// Listings for `items`, skipping (and logging) any that cannot be priced
  /// or displayed.
  pub fn listings<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<ItemListing> {
    items
      .into_iter()
      .filter_map(|item| match item.listing() {
        Ok(listing) => Some(listing),
        Err(e) => {
          warn!(error = %e, "Skipping catalog item that cannot be listed.");
          None
        }
      })
      .collect()
  }

  pub fn all_listings(&self) -> Vec<ItemListing> {
    Self::listings(&self.items)
  }

  pub fn options(&self) -> CatalogOptions {
    fn collect<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
      values
        .map(|v| v.unwrap_or(MISSING_OPTION).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
    }

    CatalogOptions {
      style: collect(self.items.iter().map(Item::style)),
      color: collect(self.items.iter().map(Item::color)),
      season: collect(self.items.iter().map(Item::season)),
      category: collect(self.items.iter().map(Item::category)),
    }
  }
}
