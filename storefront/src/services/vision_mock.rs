// modoya_storefront/src/services/vision_mock.rs
use crate::config::AppConfig;
use async_trait::async_trait;
use modoya::style_match::{KEY_DESIGN_ELEMENTS_KEY, RECOMMENDATIONS_KEY, STYLE_RANKING_KEY};
use modoya::{Catalog, ModoyaError, ModoyaResult, StyleClassifier, StyleImage};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Uploads starting with this marker make the mock fail.
pub const FAILURE_MARKER: &[u8] = b"FAIL_TEST";

const RANKING_DEPTH: usize = 3;

/// Simulated vision service.
///
/// Ranks `preferred_style` first when configured. Otherwise the top style is
/// picked from the catalog's styles by a checksum of the uploaded bytes, so
/// the same photos always yield the same answer.
#[derive(Debug, Clone)]
pub struct MockVisionService {
  preferred_style: Option<String>,
  known_styles: Vec<String>,
  latency: Duration,
}

impl MockVisionService {
  pub fn new(preferred_style: Option<String>, known_styles: Vec<String>, latency: Duration) -> Self {
    Self {
      preferred_style,
      known_styles,
      latency,
    }
  }

  pub fn from_config(config: &AppConfig, catalog: &Catalog) -> Self {
    let known_styles = catalog
      .options()
      .style
      .into_iter()
      .filter(|style| style != modoya::MISSING_OPTION)
      .collect();
    Self::new(
      config.mock_vision_style.clone(),
      known_styles,
      Duration::from_millis(config.mock_vision_latency_ms),
    )
  }

  fn ranking(&self, images: &[StyleImage]) -> Vec<String> {
    let checksum = images
      .iter()
      .flat_map(|image| image.bytes.iter())
      .fold(0u64, |acc, byte| acc.wrapping_mul(31).wrapping_add(u64::from(*byte)));

    let mut ranking: Vec<String> = Vec::with_capacity(RANKING_DEPTH);
    if let Some(preferred) = &self.preferred_style {
      ranking.push(preferred.clone());
    }
    if !self.known_styles.is_empty() {
      let start = (checksum % self.known_styles.len() as u64) as usize;
      let rotated = self.known_styles[start..].iter().chain(&self.known_styles[..start]);
      for style in rotated {
        if ranking.len() == RANKING_DEPTH {
          break;
        }
        if !ranking.contains(style) {
          ranking.push(style.clone());
        }
      }
    }
    ranking
  }
}

#[async_trait]
impl StyleClassifier for MockVisionService {
  #[instrument(name = "vision_mock::analyze", skip_all, fields(image_count = images.len()))]
  async fn analyze(&self, images: &[StyleImage]) -> ModoyaResult<Value> {
    info!("Simulating style analysis request for {} image(s).", images.len());
    tokio::time::sleep(self.latency).await; // Simulate network latency

    if images.iter().any(|image| image.bytes.starts_with(FAILURE_MARKER)) {
      warn!("Simulated vision service failure triggered by upload marker.");
      return Err(ModoyaError::ClassifierFailure(
        "Simulated vision service failure".to_string(),
      ));
    }

    let ranking = self.ranking(images);
    let top = ranking.first().cloned().unwrap_or_default();
    let ranked: Vec<Value> = ranking
      .iter()
      .enumerate()
      .map(|(idx, style)| json!({ "style": style, "confidence": 0.9 - 0.25 * idx as f64 }))
      .collect();

    info!(top_style = %top, "Mock style analysis complete.");
    Ok(json!({
      STYLE_RANKING_KEY: ranked,
      KEY_DESIGN_ELEMENTS_KEY: ["clean silhouettes", "natural textures", "muted palette"],
      RECOMMENDATIONS_KEY: [
        format!("Anchor the room with a {} statement piece.", top),
        "Keep accent colours to two or three tones.",
      ],
    }))
  }
}
