// modoya/src/pricing.rs

//! Rent and buyout pricing.
//!
//! Both prices are pure functions of an item's category, material and style.
//! Amounts are whole currency units. Lookups are exact string matches; an
//! unknown or absent category falls back to the default base rate and an
//! absent material or style adds nothing.

use crate::catalog::Item;
use serde::Serialize;

pub const DEFAULT_BASE_RENT: u64 = 25;
pub const DEFAULT_BASE_BUYOUT: u64 = 500;

pub const PREMIUM_MATERIALS: [&str; 3] = ["Velvet", "Leather", "Marble"];
pub const PREMIUM_STYLES: [&str; 2] = ["Mid-Century Modern", "Art Deco"];

const PREMIUM_MATERIAL_RENT: u64 = 15;
const PREMIUM_STYLE_RENT: u64 = 10;
const PREMIUM_MATERIAL_BUYOUT: u64 = 300;
const PREMIUM_STYLE_BUYOUT: u64 = 150;

/// Derived on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
  pub monthly_rent: u64,
  pub buyout_price: u64,
}

fn base_rent(category: Option<&str>) -> u64 {
  match category {
    Some("Sofa") => 60,
    Some("Chair") => 40,
    Some("Storage") => 35,
    Some("Lamp") => 20,
    _ => DEFAULT_BASE_RENT,
  }
}

fn base_buyout(category: Option<&str>) -> u64 {
  match category {
    Some("Sofa") => 1200,
    Some("Chair") => 800,
    Some("Storage") => 700,
    Some("Lamp") => 350,
    _ => DEFAULT_BASE_BUYOUT,
  }
}

fn is_premium_material(material: Option<&str>) -> bool {
  material.is_some_and(|m| PREMIUM_MATERIALS.contains(&m))
}

fn is_premium_style(style: Option<&str>) -> bool {
  style.is_some_and(|s| PREMIUM_STYLES.contains(&s))
}

pub fn monthly_rent(category: Option<&str>, material: Option<&str>, style: Option<&str>) -> u64 {
  let mut rent = base_rent(category);
  if is_premium_material(material) {
    rent += PREMIUM_MATERIAL_RENT;
  }
  if is_premium_style(style) {
    rent += PREMIUM_STYLE_RENT;
  }
  rent
}

pub fn buyout_price(category: Option<&str>, material: Option<&str>, style: Option<&str>) -> u64 {
  let mut price = base_buyout(category);
  if is_premium_material(material) {
    price += PREMIUM_MATERIAL_BUYOUT;
  }
  if is_premium_style(style) {
    price += PREMIUM_STYLE_BUYOUT;
  }
  price
}

pub fn quote(item: &Item) -> PriceQuote {
  PriceQuote {
    monthly_rent: monthly_rent(item.category(), item.material(), item.style()),
    buyout_price: buyout_price(item.category(), item.material(), item.style()),
  }
}

/// Pre-paid total for renting at `monthly_rent` over `months`.
pub fn rental_total(monthly_rent: u64, months: u32) -> u64 {
  monthly_rent * u64::from(months)
}

/// `$1,250.00`-style display form. Presentation only.
pub fn format_amount(amount: u64) -> String {
  let digits = amount.to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (idx, ch) in digits.chars().enumerate() {
    if idx > 0 && (digits.len() - idx) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }
  format!("${}.00", grouped)
}
