// modoya/src/style_match.rs

//! Style-matched recommendations.
//!
//! An external vision service looks at uploaded photos and answers with a
//! style descriptor. Only its top-ranked style is used here; the catalog is
//! filtered by that style and a few matches are sampled at random.

use crate::catalog::{Catalog, ItemListing};
use crate::error::{ModoyaError, ModoyaResult};
use crate::filter::{filter_items, FilterCriteria};
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

pub const MAX_RECOMMENDATIONS: usize = 4;
pub const MAX_STYLE_IMAGES: usize = 3;

/// Descriptor keys produced by the vision service.
pub const STYLE_RANKING_KEY: &str = "style_ranking";
pub const KEY_DESIGN_ELEMENTS_KEY: &str = "key_design_elements";
pub const RECOMMENDATIONS_KEY: &str = "recommendations";

/// One uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleImage {
  pub bytes: Vec<u8>,
}

/// The external vision collaborator.
///
/// Implementations receive one to three images and return a JSON object
/// carrying at least a `style_ranking` list.
#[async_trait]
pub trait StyleClassifier: Send + Sync {
  async fn analyze(&self, images: &[StyleImage]) -> ModoyaResult<Value>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
  #[serde(flatten)]
  pub item: ItemListing,
  pub match_reason: String,
}

/// Extracts the top-ranked style name from a descriptor.
///
/// The first `style_ranking` entry wins. An entry is either a string or an
/// object with a `style` (or `name`) string.
pub fn top_style(analysis: &Value) -> ModoyaResult<String> {
  let ranking = analysis
    .get(STYLE_RANKING_KEY)
    .and_then(Value::as_array)
    .ok_or_else(|| ModoyaError::MalformedStyleAnalysis(format!("missing '{}' list", STYLE_RANKING_KEY)))?;

  let first = ranking
    .first()
    .ok_or_else(|| ModoyaError::MalformedStyleAnalysis(format!("'{}' is empty", STYLE_RANKING_KEY)))?;

  let name = match first {
    Value::String(name) => Some(name.as_str()),
    Value::Object(entry) => entry.get("style").or_else(|| entry.get("name")).and_then(Value::as_str),
    _ => None,
  };

  name
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .map(str::to_string)
    .ok_or_else(|| ModoyaError::MalformedStyleAnalysis("top-ranked style has no name".to_string()))
}

/// Up to [`MAX_RECOMMENDATIONS`] items of `style`, sampled uniformly without
/// ranking. Items that cannot be listed are never sampled.
pub fn recommend(catalog: &Catalog, style: &str, rng: &mut impl Rng) -> Vec<Recommendation> {
  let matches = filter_items(catalog.items(), &FilterCriteria::by_style(style));
  let candidates = Catalog::listings(matches);
  let match_reason = format!("Matches your {} style", style);

  candidates
    .choose_multiple(rng, MAX_RECOMMENDATIONS)
    .cloned()
    .map(|item| Recommendation {
      item,
      match_reason: match_reason.clone(),
    })
    .collect()
}

/// Upload checks done before the classifier is called.
pub fn validate_images(images: &[StyleImage]) -> ModoyaResult<()> {
  if images.is_empty() {
    return Err(ModoyaError::InvalidUpload("at least one image is required".to_string()));
  }
  if images.len() > MAX_STYLE_IMAGES {
    return Err(ModoyaError::InvalidUpload(format!(
      "at most {} images are accepted, got {}",
      MAX_STYLE_IMAGES,
      images.len()
    )));
  }
  if let Some(idx) = images.iter().position(|image| image.bytes.is_empty()) {
    return Err(ModoyaError::InvalidUpload(format!("image {} is empty", idx + 1)));
  }
  Ok(())
}

/// Outcome of a full style match: the inferred style, the untouched
/// descriptor, and the sampled items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMatch {
  pub style: String,
  pub analysis: Value,
  pub recommendations: Vec<Recommendation>,
}

/// Validate, classify, extract the top style, sample. Any failure fails the
/// whole match.
pub async fn match_style<C>(
  classifier: &C,
  catalog: &Catalog,
  images: &[StyleImage],
  rng: &mut (impl Rng + Send),
) -> ModoyaResult<StyleMatch>
where
  C: StyleClassifier + ?Sized,
{
  validate_images(images)?;
  let analysis = classifier.analyze(images).await?;
  let style = top_style(&analysis)?;
  let recommendations = recommend(catalog, &style, rng);
  tracing::info!(%style, count = recommendations.len(), "Style match complete.");
  Ok(StyleMatch {
    style,
    analysis,
    recommendations,
  })
}
