use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::app::coords::Coords;
use crate::constants::{
  ACCEPT_LANGUAGE_DEFAULT, NOMINATIM_API_BASE, REQUEST_TIMEOUT_SECS_DEFAULT, USER_AGENT_DEFAULT,
};
use crate::data::storage::KeyValueStore;
use crate::json_extract::extract_opt_f64_from_value_map;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeOutcome {
  Found(Coords),
  NotFound,
}

/*
* Transient faults stay distinct from "no such place": the scheduler
* skips both, but only NotFound is a definitive answer worth caching.
*/
#[derive(Debug, Error)]
pub enum GeocodeError {
  #[error("geocoding request failed: {0}")]
  Network(String),
  #[error("geocoding service returned status {0}")]
  Status(u16),
  #[error("unreadable geocoding response: {0}")]
  Parse(String),
}

#[async_trait]
pub trait Geocode: Send + Sync {
  async fn geocode(&self, city: &str, country: &str) -> Result<GeocodeOutcome, GeocodeError>;
}

/* Composite key memoizing one query, e.g. "Paris,France" */
pub fn cache_key(city: &str, country: &str) -> String {
  format!("{},{}", city, country)
}

pub fn build_query(city: &str, country: &str) -> String {
  if country.is_empty() {
    city.to_owned()
  } else {
    format!("{}, {}", city, country)
  }
}

/*
* Nominatim answers with a JSON array of candidate matches whose lat
* and lon fields are strings. Only the first candidate matters; an
* empty array means the place does not exist for the service.
*/
fn first_candidate_coords(body: &str) -> Result<Option<Coords>, GeocodeError> {
  let candidates: Value =
    serde_json::from_str(body).map_err(|e| GeocodeError::Parse(e.to_string()))?;
  let rows = candidates
    .as_array()
    .ok_or_else(|| GeocodeError::Parse("expected a JSON array of matches".to_owned()))?;
  let first = match rows.first() {
    Some(Value::Object(row)) => row,
    Some(_) => return Err(GeocodeError::Parse("candidate is not an object".to_owned())),
    None => return Ok(None),
  };
  let lat = extract_opt_f64_from_value_map(first, "lat");
  let lon = extract_opt_f64_from_value_map(first, "lon");
  match (lat, lon) {
    (Some(lat), Some(lon)) => Ok(Some(Coords::new(lat, lon))),
    _ => Err(GeocodeError::Parse("candidate without numeric lat/lon".to_owned())),
  }
}

pub struct GeocodeClient {
  http: Client,
  cache: Arc<dyn KeyValueStore>,
  api_base: String,
  accept_language: String,
}

impl GeocodeClient {
  pub fn new(cache: Arc<dyn KeyValueStore>) -> GeocodeClient {
    GeocodeClient::with_options(
      cache,
      NOMINATIM_API_BASE,
      ACCEPT_LANGUAGE_DEFAULT,
      USER_AGENT_DEFAULT,
      Duration::from_secs(REQUEST_TIMEOUT_SECS_DEFAULT),
    )
  }

  /*
  * The timeout bounds every remote call so one hung request cannot
  * stall a whole batch.
  */
  pub fn with_options(
    cache: Arc<dyn KeyValueStore>,
    api_base: &str,
    accept_language: &str,
    user_agent: &str,
    timeout: Duration,
  ) -> GeocodeClient {
    let mut headers = header::HeaderMap::new();
    if let Ok(ua) = header::HeaderValue::from_str(user_agent) {
      headers.insert(header::USER_AGENT, ua);
    }
    let http = Client::builder()
      .timeout(timeout)
      .default_headers(headers)
      .build()
      .unwrap_or_else(|_| Client::new());
    GeocodeClient {
      http,
      cache,
      api_base: api_base.trim_end_matches('/').to_owned(),
      accept_language: accept_language.to_owned(),
    }
  }
}

#[async_trait]
impl Geocode for GeocodeClient {
  async fn geocode(&self, city: &str, country: &str) -> Result<GeocodeOutcome, GeocodeError> {
    let key = cache_key(city, country);
    if let Some(raw) = self.cache.get(&key) {
      match serde_json::from_str::<Coords>(&raw) {
        Ok(coords) => {
          debug!(%key, "geocode cache hit");
          return Ok(GeocodeOutcome::Found(coords));
        }
        Err(err) => {
          warn!(%key, %err, "discarding malformed geocode cache entry");
        }
      }
    }
    let url = format!("{}/search", self.api_base);
    let query = build_query(city, country);
    let response = self
      .http
      .get(&url)
      .query(&[("format", "json"), ("q", query.as_str())])
      .header(header::ACCEPT_LANGUAGE, self.accept_language.as_str())
      .send()
      .await
      .map_err(|e| GeocodeError::Network(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
      return Err(GeocodeError::Status(status.as_u16()));
    }
    let body = response
      .text()
      .await
      .map_err(|e| GeocodeError::Network(e.to_string()))?;
    match first_candidate_coords(&body)? {
      Some(coords) => {
        if let Ok(encoded) = serde_json::to_string(&coords) {
          self.cache.set(&key, &encoded);
        }
        debug!(%key, lat = coords.lat, lon = coords.lon, "geocoded");
        Ok(GeocodeOutcome::Found(coords))
      }
      None => {
        debug!(%key, "no geocoding matches");
        Ok(GeocodeOutcome::NotFound)
      }
    }
  }
}
