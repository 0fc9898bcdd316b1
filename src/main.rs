use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use travelmap::app::place::{normalize_place, recent_logs};
use travelmap::app::trips::{load_trips, sort_by_start_date};
use travelmap::args::Args;
use travelmap::constants::*;
use travelmap::data::fixture::load_records;
use travelmap::data::storage::{FileStore, KeyValueStore};
use travelmap::map::geojson::GeoJsonMap;
use travelmap::map::loader::{load_cities, LoadOptions, TokioPacer};
use travelmap::map::view::MapWidget;
use travelmap::services::nominatim::GeocodeClient;

fn match_fixture_url(args: &Args) -> String {
  if args.fixture.is_empty() {
    dotenv::var("TRAVELMAP_FIXTURE_URL").unwrap_or(FIXTURE_URL_DEFAULT.to_string())
  } else {
    args.fixture.clone()
  }
}

fn match_storage_path(args: &Args) -> String {
  if args.storage.is_empty() {
    dotenv::var("TRAVELMAP_STORAGE").unwrap_or(STORAGE_PATH_DEFAULT.to_string())
  } else {
    args.storage.clone()
  }
}

fn match_geocoder_base(args: &Args) -> String {
  if args.geocoder.is_empty() {
    dotenv::var("TRAVELMAP_GEOCODER_BASE").unwrap_or(NOMINATIM_API_BASE.to_string())
  } else {
    args.geocoder.clone()
  }
}

fn match_user_agent() -> String {
  dotenv::var("TRAVELMAP_USER_AGENT").unwrap_or(USER_AGENT_DEFAULT.to_string())
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let args = Args::parse();
  let timeout = Duration::from_secs(args.timeout);
  let storage_path = match_storage_path(&args);
  let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(Path::new(&storage_path)));

  let records = load_records(&match_fixture_url(&args), timeout, store.as_ref()).await;
  let places: Vec<_> = records.iter().map(normalize_place).collect();

  let mut trips = load_trips(store.as_ref());
  sort_by_start_date(&mut trips);
  if let Some(next_trip) = trips.first() {
    info!(destination = %next_trip.destination, departs = %next_trip.start_date, "next planned trip");
  }

  if places.is_empty() {
    println!("No places yet. Add your first place to start the journal.");
    return;
  }

  println!("{} places visited; most recent:", places.len());
  for place in recent_logs(&places, args.recent) {
    println!("  {} — {}", place.display_name, place.date_visited);
  }

  let geocoder = GeocodeClient::with_options(
    store.clone(),
    &match_geocoder_base(&args),
    &args.lang,
    &match_user_agent(),
    timeout,
  );
  let mut map = GeoJsonMap::new();
  map.invalidate_size();
  let opts = LoadOptions {
    batch_size: args.batch,
    delay: Duration::from_millis(args.delay),
  };
  let summary = load_cities(&places, &geocoder, &mut map, opts, &TokioPacer).await;
  info!(
    placed = summary.placed,
    not_found = summary.not_found,
    failed = summary.failed,
    batches = summary.batches,
    "map load finished"
  );

  if args.geojson {
    println!("{:#}", map.feature_collection());
  } else if let Some(viewport) = map.viewport() {
    println!(
      "{} markers placed; viewport {:.4},{:.4} to {:.4},{:.4}",
      map.marker_count(),
      viewport.south,
      viewport.west,
      viewport.north,
      viewport.east
    );
  } else {
    println!("No places could be located on the map.");
  }
}
