// modoya/src/catalog/loader.rs

use super::{Catalog, Item, ItemRecord};
use crate::error::{ModoyaError, ModoyaResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Reads every `*.json` sidecar in `dir` (not recursive) into a [`Catalog`].
///
/// Files are visited in file-name order so the catalog order is stable.
/// A missing directory is `CatalogNotFound`; a sidecar that is not valid JSON
/// aborts the whole load with `MalformedRecord`. Absent fields are accepted.
#[instrument(name = "catalog::load", skip_all, fields(catalog_dir = %dir.as_ref().display()), err(Display))]
pub fn load_catalog(dir: impl AsRef<Path>) -> ModoyaResult<Catalog> {
  let dir = dir.as_ref();
  if !dir.is_dir() {
    return Err(ModoyaError::CatalogNotFound { path: dir.to_path_buf() });
  }

  let entries = fs::read_dir(dir).map_err(|source| ModoyaError::CatalogIo {
    path: dir.to_path_buf(),
    source,
  })?;

  let mut sidecars: Vec<PathBuf> = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|source| ModoyaError::CatalogIo {
      path: dir.to_path_buf(),
      source,
    })?;
    let path = entry.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
      sidecars.push(path);
    }
  }
  sidecars.sort();

  let mut items = Vec::with_capacity(sidecars.len());
  for path in sidecars {
    let record = read_sidecar(&path)?;
    let image_path = resolve_image(dir, &record);
    items.push(Item::new(record, image_path));
  }

  info!(count = items.len(), "Catalog loaded.");
  Ok(Catalog::from_items(items))
}

fn read_sidecar(path: &Path) -> ModoyaResult<ItemRecord> {
  let raw = fs::read_to_string(path).map_err(|source| ModoyaError::CatalogIo {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&raw).map_err(|source| ModoyaError::MalformedRecord {
    path: path.to_path_buf(),
    source,
  })
}

/// The sidecar may carry a path written on another machine (including
/// Windows separators); only its last component is kept, and it is looked up
/// next to the sidecar.
fn resolve_image(dir: &Path, record: &ItemRecord) -> Option<PathBuf> {
  let declared = record.image_file.as_deref()?;
  let file_name = declared.rsplit(['/', '\\']).next().filter(|name| !name.is_empty())?;
  let image_path = dir.join(file_name);
  if image_path.is_file() {
    debug!(image = %image_path.display(), "Image resolved.");
  } else {
    warn!(image = %image_path.display(), row_id = ?record.row_id, "Declared image file does not exist.");
  }
  Some(image_path)
}
