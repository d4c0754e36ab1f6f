// modoya/src/catalog/item.rs

use crate::error::{ModoyaError, ModoyaResult};
use crate::pricing::{self, PriceQuote};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One sidecar record as it sits on disk.
///
/// Nothing is validated at load; absent keys stay `None` until something
/// needs them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
  #[serde(default)]
  pub row_id: Option<u64>,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub series: Option<String>,
  #[serde(default)]
  pub style: Option<String>,
  #[serde(default)]
  pub material: Option<String>,
  #[serde(default)]
  pub color: Option<String>,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub season: Option<String>,
  // The image generator writes `file`; curated sidecars use `image_file`.
  #[serde(default, alias = "file")]
  pub image_file: Option<String>,
}

/// A catalog entry: its metadata plus the resolved image location.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
  pub metadata: ItemRecord,
  pub image_path: Option<PathBuf>,
}

/// An item ready for display, with its price quote attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListing {
  pub id: u64,
  pub category: String,
  pub series: String,
  pub style: String,
  pub material: String,
  pub color: Option<String>,
  pub location: Option<String>,
  pub season: Option<String>,
  pub image_file: Option<String>,
  pub monthly_rent: u64,
  pub buyout_price: u64,
}

impl Item {
  pub fn new(metadata: ItemRecord, image_path: Option<PathBuf>) -> Self {
    Self { metadata, image_path }
  }

  pub fn id(&self) -> Option<u64> {
    self.metadata.row_id
  }

  pub fn category(&self) -> Option<&str> {
    self.metadata.category.as_deref()
  }

  pub fn style(&self) -> Option<&str> {
    self.metadata.style.as_deref()
  }

  pub fn material(&self) -> Option<&str> {
    self.metadata.material.as_deref()
  }

  pub fn color(&self) -> Option<&str> {
    self.metadata.color.as_deref()
  }

  pub fn season(&self) -> Option<&str> {
    self.metadata.season.as_deref()
  }

  /// File name of the image, without any directory the sidecar declared.
  pub fn image_file_name(&self) -> Option<String> {
    self
      .image_path
      .as_ref()
      .and_then(|p| p.file_name())
      .map(|name| name.to_string_lossy().into_owned())
  }

  fn label(&self) -> String {
    match (self.metadata.row_id, self.metadata.series.as_deref()) {
      (Some(id), _) => format!("#{}", id),
      (None, Some(series)) => format!("'{}'", series),
      (None, None) => "<unidentified>".to_string(),
    }
  }

  fn required<'a>(&self, value: Option<&'a str>, field: &'static str) -> ModoyaResult<&'a str> {
    value.ok_or_else(|| ModoyaError::MissingField {
      item: self.label(),
      field,
    })
  }

  pub fn quote(&self) -> PriceQuote {
    pricing::quote(self)
  }

  /// Builds the display form. Fails with `MissingField` when the item lacks
  /// something a listing or a price needs.
  pub fn listing(&self) -> ModoyaResult<ItemListing> {
    let id = self.metadata.row_id.ok_or_else(|| ModoyaError::MissingField {
      item: self.label(),
      field: "row_id",
    })?;
    let category = self.required(self.category(), "category")?;
    let series = self.required(self.metadata.series.as_deref(), "series")?;
    let style = self.required(self.style(), "style")?;
    let material = self.required(self.material(), "material")?;
    let quote = self.quote();

    Ok(ItemListing {
      id,
      category: category.to_string(),
      series: series.to_string(),
      style: style.to_string(),
      material: material.to_string(),
      color: self.metadata.color.clone(),
      location: self.metadata.location.clone(),
      season: self.metadata.season.clone(),
      image_file: self.image_file_name(),
      monthly_rent: quote.monthly_rent,
      buyout_price: quote.buyout_price,
    })
  }
}
