use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cached_http_client::build_cached_http_client;
use crate::constants::PLACES_STORAGE_KEY;
use super::storage::KeyValueStore;

#[derive(Debug, Error)]
pub enum FixtureError {
  #[error("fixture request failed: {0}")]
  Request(String),
  #[error("fixture responded with status {0}")]
  Status(u16),
  #[error("malformed fixture document: {0}")]
  Malformed(#[from] serde_json::Error),
  #[error("unreadable fixture file: {0}")]
  Io(#[from] std::io::Error),
}

/*
* The fixture is shaped { "places": [ ... ] }. A well-formed document
* without a places array is simply an empty journal, not an error.
*/
pub fn parse_places_document(body: &str) -> Result<Vec<Value>, FixtureError> {
  let doc: Value = serde_json::from_str(body)?;
  Ok(
    doc
      .get("places")
      .and_then(|places| places.as_array())
      .cloned()
      .unwrap_or_default(),
  )
}

pub async fn fetch_fixture(url: &str, timeout: Duration) -> Result<Vec<Value>, FixtureError> {
  if !url.starts_with("http://") && !url.starts_with("https://") {
    let body = std::fs::read_to_string(url)?;
    return parse_places_document(&body);
  }
  let client = build_cached_http_client(timeout);
  let response = client
    .get(url)
    .send()
    .await
    .map_err(|e| FixtureError::Request(e.to_string()))?;
  let status = response.status();
  if !status.is_success() {
    return Err(FixtureError::Status(status.as_u16()));
  }
  let body = response
    .text()
    .await
    .map_err(|e| FixtureError::Request(e.to_string()))?;
  parse_places_document(&body)
}

/*
* Fallback source: the JSON-encoded array the add-place form appends
* to under the shared storage key. Absent or malformed means an empty
* journal, never a failure.
*/
pub fn stored_places(store: &dyn KeyValueStore) -> Vec<Value> {
  store
    .get(PLACES_STORAGE_KEY)
    .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
    .and_then(|parsed| parsed.as_array().cloned())
    .unwrap_or_default()
}

/*
* Source loader contract: try the fixture, fall back to local storage
* on any failure. Degrades to an empty record list, never an error.
*/
pub async fn load_records(
  url: &str,
  timeout: Duration,
  store: &dyn KeyValueStore,
) -> Vec<Value> {
  match fetch_fixture(url, timeout).await {
    Ok(records) => {
      debug!(count = records.len(), url, "loaded places fixture");
      records
    }
    Err(err) => {
      warn!(%err, url, "could not load places fixture, falling back to local storage");
      stored_places(store)
    }
  }
}
