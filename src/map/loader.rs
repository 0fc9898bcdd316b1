use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::app::place::NormalizedPlace;
use crate::constants::{BATCH_DELAY_MS_DEFAULT, BATCH_SIZE_DEFAULT};
use crate::services::nominatim::{Geocode, GeocodeOutcome};
use super::view::{fit_to_markers, place_marker, MapWidget, MarkerGroup};

/*
* Clock seam for the politeness delay. Tests count pauses instead of
* sleeping through them.
*/
#[async_trait]
pub trait Pacer: Send + Sync {
  async fn pause(&self, delay: Duration);
}

pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
  async fn pause(&self, delay: Duration) {
    tokio::time::sleep(delay).await;
  }
}

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
  pub batch_size: usize,
  pub delay: Duration,
}

impl Default for LoadOptions {
  fn default() -> Self {
    LoadOptions {
      batch_size: BATCH_SIZE_DEFAULT,
      delay: Duration::from_millis(BATCH_DELAY_MS_DEFAULT),
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadSummary {
  pub placed: usize,
  pub not_found: usize,
  pub failed: usize,
  pub batches: usize,
}

/*
* Geocode the places in consecutive chunks, pausing between chunks to
* stay under the remote service's informal rate limits. Chunks run in
* input order; a failed member is skipped and logged, never fatal.
* The marker group lives for exactly one call: filled chunk by chunk,
* fitted at the end, then dropped.
*/
pub async fn load_cities<W: MapWidget>(
  places: &[NormalizedPlace],
  geocoder: &dyn Geocode,
  widget: &mut W,
  opts: LoadOptions,
  pacer: &dyn Pacer,
) -> LoadSummary {
  let mut group = MarkerGroup::new();
  let mut summary = LoadSummary::default();
  let chunk_size = opts.batch_size.max(1);
  let mut chunks = places.chunks(chunk_size).peekable();
  while let Some(chunk) = chunks.next() {
    summary.batches += 1;
    for place in chunk {
      match geocoder.geocode(&place.name, &place.country).await {
        Ok(GeocodeOutcome::Found(coords)) => {
          place_marker(widget, &mut group, place, coords);
          summary.placed += 1;
        }
        Ok(GeocodeOutcome::NotFound) => {
          warn!(name = %place.name, "city not found");
          summary.not_found += 1;
        }
        Err(err) => {
          warn!(name = %place.name, %err, "geocoding failed, skipping");
          summary.failed += 1;
        }
      }
    }
    if chunks.peek().is_some() {
      pacer.pause(opts.delay).await;
    }
  }
  debug!(
    placed = summary.placed,
    not_found = summary.not_found,
    failed = summary.failed,
    batches = summary.batches,
    "finished loading cities"
  );
  fit_to_markers(widget, &group);
  summary
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use serde_json::json;

  use super::*;
  use crate::app::coords::Coords;
  use crate::app::place::normalize_place;
  use crate::map::view::test_widget::RecordingMap;
  use crate::services::nominatim::GeocodeError;

  /* Scripted geocoder: answers from a fixed table, records call order */
  struct ScriptedGeocoder {
    calls: Mutex<Vec<String>>,
  }

  impl ScriptedGeocoder {
    fn new() -> Self {
      ScriptedGeocoder { calls: Mutex::new(vec![]) }
    }

    fn call_count(&self) -> usize {
      self.calls.lock().expect("calls").len()
    }
  }

  #[async_trait]
  impl Geocode for ScriptedGeocoder {
    async fn geocode(&self, city: &str, _country: &str) -> Result<GeocodeOutcome, GeocodeError> {
      self.calls.lock().expect("calls").push(city.to_owned());
      match city {
        name if name.starts_with("missing") => Ok(GeocodeOutcome::NotFound),
        name if name.starts_with("broken") => {
          Err(GeocodeError::Network("connection reset".to_owned()))
        }
        _ => Ok(GeocodeOutcome::Found(Coords::new(10.0, 20.0))),
      }
    }
  }

  #[derive(Default)]
  struct CountingPacer {
    pauses: Mutex<Vec<Duration>>,
  }

  impl CountingPacer {
    fn pause_count(&self) -> usize {
      self.pauses.lock().expect("pauses").len()
    }
  }

  #[async_trait]
  impl Pacer for CountingPacer {
    async fn pause(&self, delay: Duration) {
      self.pauses.lock().expect("pauses").push(delay);
    }
  }

  fn places(names: &[&str]) -> Vec<NormalizedPlace> {
    names
      .iter()
      .map(|name| normalize_place(&json!({ "placeName": name, "country": "X" })))
      .collect()
  }

  #[tokio::test]
  async fn twelve_places_make_three_batches_with_two_pauses() {
    let names: Vec<String> = (0..12).map(|i| format!("city{}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
    let geocoder = ScriptedGeocoder::new();
    let pacer = CountingPacer::default();
    let mut widget = RecordingMap::default();
    let summary = load_cities(
      &places(&name_refs),
      &geocoder,
      &mut widget,
      LoadOptions { batch_size: 5, delay: Duration::from_millis(500) },
      &pacer,
    )
    .await;
    assert_eq!(summary.batches, 3);
    assert_eq!(summary.placed, 12);
    assert_eq!(geocoder.call_count(), 12);
    assert_eq!(pacer.pause_count(), 2);
    assert_eq!(widget.markers.len(), 12);
  }

  #[tokio::test]
  async fn failures_are_skipped_without_aborting_the_batch() {
    let geocoder = ScriptedGeocoder::new();
    let pacer = CountingPacer::default();
    let mut widget = RecordingMap::default();
    let summary = load_cities(
      &places(&["good1", "missing1", "broken1", "good2"]),
      &geocoder,
      &mut widget,
      LoadOptions { batch_size: 2, delay: Duration::from_millis(100) },
      &pacer,
    )
    .await;
    assert_eq!(summary, LoadSummary { placed: 2, not_found: 1, failed: 1, batches: 2 });
    assert_eq!(widget.markers.len(), 2);
    // viewport still fitted around the two that resolved
    assert!(widget.fitted.is_some());
  }

  #[tokio::test]
  async fn empty_input_places_nothing_and_never_pauses() {
    let geocoder = ScriptedGeocoder::new();
    let pacer = CountingPacer::default();
    let mut widget = RecordingMap::default();
    let summary = load_cities(
      &[],
      &geocoder,
      &mut widget,
      LoadOptions::default(),
      &pacer,
    )
    .await;
    assert_eq!(summary, LoadSummary::default());
    assert_eq!(pacer.pause_count(), 0);
    assert!(widget.fitted.is_none());
  }

  #[tokio::test]
  async fn zero_batch_size_still_makes_progress() {
    let geocoder = ScriptedGeocoder::new();
    let pacer = CountingPacer::default();
    let mut widget = RecordingMap::default();
    let summary = load_cities(
      &places(&["a", "b"]),
      &geocoder,
      &mut widget,
      LoadOptions { batch_size: 0, delay: Duration::from_millis(1) },
      &pacer,
    )
    .await;
    assert_eq!(summary.placed, 2);
    assert_eq!(summary.batches, 2);
  }

  #[tokio::test]
  async fn chunks_run_in_input_order() {
    let geocoder = ScriptedGeocoder::new();
    let pacer = CountingPacer::default();
    let mut widget = RecordingMap::default();
    load_cities(
      &places(&["a", "b", "c"]),
      &geocoder,
      &mut widget,
      LoadOptions { batch_size: 1, delay: Duration::from_millis(1) },
      &pacer,
    )
    .await;
    assert_eq!(*geocoder.calls.lock().expect("calls"), vec!["a", "b", "c"]);
  }
}
