// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use modoya::{Catalog, ContextData, Item, ItemRecord, ModoyaError, ModoyaResult, PipelineControl, StyleClassifier, StyleImage};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::Level;

// --- Catalog fixtures ---
pub fn record(
  row_id: u64,
  category: &str,
  series: &str,
  style: &str,
  material: &str,
  color: &str,
  season: &str,
) -> ItemRecord {
  ItemRecord {
    row_id: Some(row_id),
    category: Some(category.to_string()),
    series: Some(series.to_string()),
    style: Some(style.to_string()),
    material: Some(material.to_string()),
    color: Some(color.to_string()),
    location: Some("Living Room".to_string()),
    season: Some(season.to_string()),
    image_file: Some(format!("item_{}.png", row_id)),
  }
}

pub fn item(record: ItemRecord) -> Item {
  Item::new(record, None)
}

/// Eight items across two styles plus one premium chair (#7).
pub fn sample_catalog() -> Catalog {
  Catalog::from_items(vec![
    item(record(1, "Sofa", "Aurora", "Scandinavian", "Linen", "Beige", "All Season")),
    item(record(2, "Chair", "Birch", "Scandinavian", "Oak", "Natural", "Summer")),
    item(record(3, "Lamp", "Halo", "Scandinavian", "Brass", "Gold", "Winter")),
    item(record(4, "Storage", "Fjord", "Scandinavian", "Pine", "White", "All Season")),
    item(record(5, "Table", "Nook", "Scandinavian", "Ash", "Natural", "Spring")),
    item(record(6, "Sofa", "Velour", "Mid-Century Modern", "Velvet", "Green", "Winter")),
    item(record(7, "Chair", "Gatsby", "Art Deco", "Leather", "Black", "Autumn")),
    item(record(8, "Lamp", "Arc", "Mid-Century Modern", "Metal", "Black", "All Season")),
  ])
}

/// Writes `value` as `<name>.json` into `dir`.
pub fn write_sidecar(dir: &Path, name: &str, value: &Value) {
  let path = dir.join(format!("{}.json", name));
  std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

pub fn sidecar_json(row_id: u64, category: &str, style: &str, material: &str, image: &str) -> Value {
  json!({
    "row_id": row_id,
    "category": category,
    "series": format!("Series {}", row_id),
    "style": style,
    "material": material,
    "color": "Grey",
    "location": "Bedroom",
    "season": "All Season",
    "image_file": image,
  })
}

// --- Vision stub ---

/// Answers every call with a fixed descriptor and counts the calls.
pub struct StubClassifier {
  pub response: ModoyaResult<Value, String>,
  pub calls: AtomicUsize,
}

impl StubClassifier {
  pub fn answering(response: Value) -> Self {
    Self {
      response: Ok(response),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn failing(message: &str) -> Self {
    Self {
      response: Err(message.to_string()),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl StyleClassifier for StubClassifier {
  async fn analyze(&self, _images: &[StyleImage]) -> ModoyaResult<Value> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.response.clone().map_err(ModoyaError::ClassifierFailure)
  }
}

pub fn image(bytes: &[u8]) -> StyleImage {
  StyleImage { bytes: bytes.to_vec() }
}

// --- Flow engine fixtures ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Engine error: {0}")]
  Engine(String), // Debug form of the ModoyaError, for Eq comparison

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<ModoyaError> for TestError {
  fn from(err: ModoyaError) -> Self {
    TestError::Engine(format!("{:?}", err))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> modoya::flow::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> modoya::flow::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

// --- Tracing ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
