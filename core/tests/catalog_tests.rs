// tests/catalog_tests.rs
mod common;

use common::*;
use modoya::{load_catalog, Catalog, Item, ItemRecord, ModoyaError, MISSING_OPTION};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn test_load_reads_every_sidecar_in_name_order() {
  setup_tracing();
  let dir = tempdir().unwrap();
  write_sidecar(dir.path(), "b_chair", &sidecar_json(2, "Chair", "Art Deco", "Leather", "b_chair.png"));
  write_sidecar(dir.path(), "a_sofa", &sidecar_json(1, "Sofa", "Scandinavian", "Linen", "a_sofa.png"));
  std::fs::write(dir.path().join("a_sofa.png"), b"png").unwrap();
  std::fs::write(dir.path().join("notes.txt"), b"not a sidecar").unwrap();

  let catalog = load_catalog(dir.path()).unwrap();

  assert_eq!(catalog.len(), 2);
  let ids: Vec<_> = catalog.items().iter().map(|i| i.id()).collect();
  assert_eq!(ids, vec![Some(1), Some(2)]);
  assert_eq!(catalog.items()[0].image_path.as_deref(), Some(dir.path().join("a_sofa.png").as_path()));
}

#[test]
fn test_load_missing_directory_is_catalog_not_found() {
  setup_tracing();
  let dir = tempdir().unwrap();
  let missing = dir.path().join("Pictures");

  let err = load_catalog(&missing).unwrap_err();
  assert!(matches!(err, ModoyaError::CatalogNotFound { ref path } if path == &missing));
}

#[test]
fn test_load_empty_directory_gives_empty_catalog() {
  let dir = tempdir().unwrap();
  let catalog = load_catalog(dir.path()).unwrap();
  assert!(catalog.is_empty());
  assert!(catalog.all_listings().is_empty());
}

#[test]
fn test_load_malformed_sidecar_aborts() {
  setup_tracing();
  let dir = tempdir().unwrap();
  write_sidecar(dir.path(), "good", &sidecar_json(1, "Sofa", "Scandinavian", "Linen", "good.png"));
  std::fs::write(dir.path().join("broken.json"), b"{ \"row_id\": 2, ").unwrap();

  let err = load_catalog(dir.path()).unwrap_err();
  match err {
    ModoyaError::MalformedRecord { path, .. } => assert!(path.ends_with("broken.json")),
    other => panic!("Expected MalformedRecord, got {:?}", other),
  }
}

#[test]
fn test_load_accepts_absent_fields_and_file_alias() {
  let dir = tempdir().unwrap();
  write_sidecar(dir.path(), "generated", &json!({ "row_id": 9, "file": "C:\\renders\\generated.png" }));

  let catalog = load_catalog(dir.path()).unwrap();
  let item = catalog.get(9).unwrap();

  assert_eq!(item.category(), None);
  assert_eq!(item.image_file_name().as_deref(), Some("generated.png"));
  assert_eq!(item.image_path.as_deref(), Some(dir.path().join("generated.png").as_path()));
}

#[test]
fn test_load_strips_directories_from_declared_image() {
  let dir = tempdir().unwrap();
  write_sidecar(
    dir.path(),
    "lamp",
    &sidecar_json(3, "Lamp", "Art Deco", "Brass", "/home/designer/out/lamp.png"),
  );

  let catalog = load_catalog(dir.path()).unwrap();
  assert_eq!(catalog.get(3).unwrap().image_file_name().as_deref(), Some("lamp.png"));
}

#[test]
fn test_get_returns_first_matching_row_id() {
  let catalog = Catalog::from_items(vec![
    item(record(1, "Sofa", "First", "Scandinavian", "Linen", "Beige", "Summer")),
    item(record(1, "Lamp", "Second", "Scandinavian", "Brass", "Gold", "Winter")),
  ]);

  assert_eq!(catalog.get(1).unwrap().metadata.series.as_deref(), Some("First"));
  assert!(catalog.get(99).is_none());
}

#[test]
fn test_listing_requires_priced_fields() {
  let catalog = Catalog::from_items(vec![
    item(record(1, "Sofa", "Aurora", "Scandinavian", "Linen", "Beige", "Summer")),
    Item::new(
      ItemRecord {
        row_id: Some(2),
        category: Some("Chair".to_string()),
        ..Default::default()
      },
      None,
    ),
  ]);

  let err = catalog.get(2).unwrap().listing().unwrap_err();
  assert!(matches!(err, ModoyaError::MissingField { field: "series", .. }));

  let listings = catalog.all_listings();
  assert_eq!(listings.len(), 1);
  assert_eq!(listings[0].id, 1);
  assert_eq!(listings[0].monthly_rent, 60);
  assert_eq!(listings[0].buyout_price, 1200);
}

#[test]
fn test_options_are_sorted_distinct_with_placeholder() {
  let mut bare = record(10, "Sofa", "Bare", "Scandinavian", "Linen", "Beige", "Summer");
  bare.color = None;
  bare.season = None;
  let mut items: Vec<Item> = sample_catalog().items().to_vec();
  items.push(item(bare));
  let catalog = Catalog::from_items(items);

  let options = catalog.options();

  assert_eq!(options.style, vec!["Art Deco", "Mid-Century Modern", "Scandinavian"]);
  assert_eq!(options.category, vec!["Chair", "Lamp", "Sofa", "Storage", "Table"]);
  assert!(options.color.contains(&MISSING_OPTION.to_string()));
  assert!(options.season.contains(&MISSING_OPTION.to_string()));
  let mut sorted = options.color.clone();
  sorted.sort();
  assert_eq!(options.color, sorted);
}
