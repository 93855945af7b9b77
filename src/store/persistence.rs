/*!
 * Reading and writing the translation store file.
 *
 * The canonical file is a pretty-printed JSON array of `{"source", "target"}`
 * objects. Older tools wrote other shapes which are still accepted on read and
 * normalised to the canonical form on the next save:
 *
 * - a keyed mapping `{"<key>": {"en": ..., "ja": ...}, ...}`
 * - a wrapper object `{"descriptions": [{"file": ..., "en": ..., "ja": ...}]}`
 *
 * Keyed mappings are read in file order.
 */

use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::models::{TranslationRecord, TranslationStore};
use crate::errors::StoreError;

/// Field names accepted for the source text, in priority order
const SOURCE_FIELDS: &[&str] = &["source", "en", "original"];

/// Field names accepted for the translated text, in priority order
const TARGET_FIELDS: &[&str] = &["target", "ja", "translated"];

/// Wrapper key used by the legacy batch format
const LEGACY_WRAPPER_KEY: &str = "descriptions";

/// Suffix given to a malformed store set aside by `load_or_create`
const MALFORMED_SUFFIX: &str = "malformed";

impl TranslationStore {
    /// Load a store, failing if the file is missing or malformed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(path.to_path_buf()));
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let store = Self::parse(&content).map_err(|reason| StoreError::Malformed {
            path: path.to_path_buf(),
            reason,
        })?;

        debug!("Loaded {} translation records from {:?}", store.len(), path);
        Ok(store)
    }

    /// Load a store, starting empty if the file does not exist.
    ///
    /// A malformed file is copied aside to `<path>.malformed` and an empty
    /// store is returned, so the next save cannot destroy the only copy.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();

        match Self::load(path) {
            Ok(store) => Ok(store),
            Err(StoreError::NotFound(_)) => {
                info!("No translation store at {:?}, starting a new one", path);
                Ok(Self::new())
            }
            Err(StoreError::Malformed { reason, .. }) => {
                let aside = malformed_copy_path(path);
                warn!(
                    "Failed to read existing translation store {:?}: {}. Starting empty; the old file is kept at {:?}",
                    path, reason, aside
                );
                fs::copy(path, &aside).map_err(|e| StoreError::Io {
                    path: aside.clone(),
                    source: e,
                })?;
                Ok(Self::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite `path` with the canonical serialization of this store.
    ///
    /// The file is written to a temporary file in the same directory and then
    /// renamed over the target, so an interrupted save leaves the previous
    /// version intact.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let path = path.as_ref();
        let json = self.to_json()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let io_error = |e: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        fs::create_dir_all(&dir).map_err(io_error)?;
        let mut file = NamedTempFile::new_in(&dir).map_err(io_error)?;
        file.write_all(json.as_bytes()).map_err(io_error)?;
        file.flush().map_err(io_error)?;
        file.persist(path).map_err(|e| io_error(e.error))?;

        debug!("Saved {} translation records to {:?}", self.len(), path);
        Ok(())
    }

    /// Canonical JSON form: a 2-space indented array of records
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self.records())?)
    }

    /// Parse any accepted store shape
    pub fn parse(content: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;

        let records = match value {
            Value::Array(items) => records_from_items(&items)?,
            Value::Object(map) => records_from_object(map)?,
            other => {
                return Err(format!(
                    "expected an array of records, found {}",
                    value_kind(&other)
                ));
            }
        };

        let parsed = records.len();
        let store = Self::from_records(records);
        if store.len() < parsed {
            warn!(
                "Dropped {} record(s) with an empty or duplicate source",
                parsed - store.len()
            );
        }
        Ok(store)
    }
}

fn records_from_object(map: Map<String, Value>) -> Result<Vec<TranslationRecord>, String> {
    if let Some(Value::Array(items)) = map.get(LEGACY_WRAPPER_KEY) {
        debug!("Reading legacy wrapped translation store");
        return records_from_items(items);
    }

    debug!("Reading legacy keyed translation store");
    map.values()
        .map(record_from_value)
        .collect::<Result<Vec<_>, _>>()
}

fn records_from_items(items: &[Value]) -> Result<Vec<TranslationRecord>, String> {
    items.iter().map(record_from_value).collect()
}

fn record_from_value(value: &Value) -> Result<TranslationRecord, String> {
    let Value::Object(fields) = value else {
        return Err(format!("expected a record object, found {}", value_kind(value)));
    };

    Ok(TranslationRecord::new(
        first_text_field(fields, SOURCE_FIELDS),
        first_text_field(fields, TARGET_FIELDS),
    ))
}

/// First non-empty string among `names`, or an empty string
fn first_text_field(fields: &Map<String, Value>, names: &[&str]) -> String {
    names
        .iter()
        .filter_map(|name| fields.get(*name).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn malformed_copy_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(MALFORMED_SUFFIX);
    PathBuf::from(name)
}
