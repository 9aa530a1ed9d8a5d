//! Reading and writing topology description files.
//!
//! A description file is a single JSON object with optional `sources`,
//! `processors`, `sinks` and `stores` arrays (see [`TopologyDescription`]).
//! Parse failures surface as [`std::io::ErrorKind::InvalidData`] so callers
//! handle a malformed file the same way as an unreadable one.

use std::io;
use std::path::Path;

use tracing::{debug, instrument};

use crate::description::TopologyDescription;

/// Reads the description at `path`.
///
/// Unknown fields anywhere in the object are rejected.
#[instrument(level = "trace", skip(path), fields(path = %path.display()))]
pub fn load_description(path: &Path) -> io::Result<TopologyDescription> {
  let raw = std::fs::read(path)?;
  let description: TopologyDescription =
    serde_json::from_slice(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
  debug!(
    sources = description.sources.len(),
    processors = description.processors.len(),
    sinks = description.sinks.len(),
    stores = description.stores.len(),
    "loaded topology description"
  );
  Ok(description)
}

/// Writes `description` to `path` as indented JSON. Missing parent
/// directories are created.
#[instrument(level = "trace", skip(path, description), fields(path = %path.display()))]
pub fn save_description(path: &Path, description: &TopologyDescription) -> io::Result<()> {
  let json = serde_json::to_string_pretty(description)
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
  if let Some(dir) = path.parent() {
    std::fs::create_dir_all(dir)?;
  }
  std::fs::write(path, json)
}
