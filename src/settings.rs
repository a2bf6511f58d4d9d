//! Reading and replacing the custom modes inside Cursor's settings record.
//!
//! Cursor stores one JSON object under [`SETTINGS_KEY`]. The custom modes live
//! at `composerState.modes4`; everything else in the object belongs to other
//! Cursor features and is carried through a write untouched.

use crate::storage::KeyValueStore;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// `ItemTable` key of the application-wide settings record.
pub const SETTINGS_KEY: &str =
    "src.vs.platform.reactivestorage.browser.reactiveStorageServiceImpl.persistentStorage.applicationUser";

/// Top-level property holding the composer settings.
pub const COMPOSER_STATE: &str = "composerState";

/// Property of [`COMPOSER_STATE`] holding the custom modes array.
pub const MODES_FIELD: &str = "modes4";

/// Records read from the settings record.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub records: Vec<Value>,
    /// Set when the modes array was absent and `records` is empty by default.
    pub diagnostic: Option<String>,
}

/// Read the custom modes stored under `key`.
///
/// A missing row or malformed JSON is an error. A record without a
/// `composerState.modes4` array yields no records and a diagnostic.
pub fn extract(store: &dyn KeyValueStore, key: &str) -> Result<Extraction> {
    let record = fetch_record(store, key)?;

    let missing = |what: &str| -> Result<Extraction> {
        let diagnostic = format!("{}; treating as no saved modes", what);
        tracing::debug!("{}", diagnostic);
        Ok(Extraction {
            records: Vec::new(),
            diagnostic: Some(diagnostic),
        })
    };

    let Some(container) = record.get(COMPOSER_STATE) else {
        return missing(&format!("settings record has no {}", COMPOSER_STATE));
    };
    match container.get(MODES_FIELD) {
        Some(Value::Array(records)) => Ok(Extraction {
            records: records.clone(),
            diagnostic: None,
        }),
        Some(_) => missing(&format!(
            "{}.{} is not an array",
            COMPOSER_STATE, MODES_FIELD
        )),
        None => missing(&format!("{} has no {}", COMPOSER_STATE, MODES_FIELD)),
    }
}

/// Replace the custom modes stored under `key` with `records`.
///
/// The row must already exist. A missing `composerState` is created; every
/// other property of the record and of `composerState` is kept as-is. The
/// whole record is written back with a single update.
pub fn merge(store: &mut dyn KeyValueStore, key: &str, records: Vec<Value>) -> Result<()> {
    let mut record = fetch_record(store, key)?;

    let Value::Object(top) = &mut record else {
        return Err(Error::TypeMismatch(format!(
            "settings value under {} is not a JSON object",
            key
        )));
    };

    let container = top
        .entry(COMPOSER_STATE)
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(container) = container else {
        return Err(Error::TypeMismatch(format!(
            "{} is not a JSON object",
            COMPOSER_STATE
        )));
    };
    container.insert(MODES_FIELD.to_string(), Value::Array(records));

    let serialized = serde_json::to_string(&record)?;
    store.set(key, &serialized)
}

fn fetch_record(store: &dyn KeyValueStore, key: &str) -> Result<Value> {
    let raw = store
        .get(key)?
        .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;

    serde_json::from_str(&raw).map_err(|source| Error::Parse {
        context: format!("settings value under {}", key),
        source,
    })
}

/// Identifier and display name of one mode, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeSummary {
    pub id: String,
    pub name: String,
}

impl ModeSummary {
    /// Summarize a mode, using `unknown`/`Unknown` for missing fields.
    pub fn from_record(record: &Value) -> Self {
        let field = |name: &str| record.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            id: field("id").unwrap_or_else(|| "unknown".to_string()),
            name: field("name").unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}
