// modoya/src/lib.rs

//! Modoya: the domain core of a furniture rental storefront.
//!
//! The crate covers:
//!  - Loading the item catalog from JSON sidecar files.
//!  - Rent and buyout pricing derived from category, material and style.
//!  - Equality filtering over catalog items.
//!  - Per-session carts with rent/buy entries and rental durations.
//!  - Checking out one order type at a time.
//!  - Style-matched recommendations driven by an external vision service.
//!  - A small step-pipeline engine ([`flow`]) the web layer composes its
//!    request workflows with.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod filter;
pub mod flow;
pub mod pricing;
pub mod style_match;

// --- Re-exports for the Public API ---

pub use crate::cart::{
  Cart, CartAction, CartEntry, CartLine, CartStore, CartSummary, OrderType, UpdateOutcome, DEFAULT_RENTAL_MONTHS,
};
pub use crate::catalog::{load_catalog, Catalog, CatalogOptions, Item, ItemListing, ItemRecord, MISSING_OPTION};
pub use crate::checkout::{checkout, checkout_session, Order, OrderId};
pub use crate::error::{ModoyaError, ModoyaResult};
pub use crate::filter::{filter_items, FilterCriteria};
pub use crate::flow::{ContextData, Pipeline, PipelineControl, PipelineResult, Workflows};
pub use crate::pricing::PriceQuote;
pub use crate::style_match::{
  match_style, recommend, top_style, validate_images, Recommendation, StyleClassifier, StyleImage, StyleMatch,
};
