use clap::Parser;
use super::constants::*;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
  // -f URL or file path of the places fixture
  #[clap(short, long, value_parser, default_value_t = String::new() )]
  pub fixture: String,
  // -s path of the JSON file backing the local key-value store
  #[clap(short, long, value_parser, default_value_t = String::new() )]
  pub storage: String,
  // -g geocoding API base URL
  #[clap(short, long, value_parser, default_value_t = String::new() )]
  pub geocoder: String,
  // -b geocoding batch size
  #[clap(short, long, value_parser, default_value_t = BATCH_SIZE_DEFAULT )]
  pub batch: usize,
  // -d delay between geocoding batches in milliseconds
  #[clap(short, long, value_parser, default_value_t = BATCH_DELAY_MS_DEFAULT )]
  pub delay: u64,
  // -t per-request timeout in seconds
  #[clap(short, long, value_parser, default_value_t = REQUEST_TIMEOUT_SECS_DEFAULT )]
  pub timeout: u64,
  // -l Accept-Language preference sent to the geocoder
  #[clap(short, long, value_parser, default_value_t = ACCEPT_LANGUAGE_DEFAULT.to_string() )]
  pub lang: String,
  // -r number of recent travel-log entries to list
  #[clap(short, long, value_parser, default_value_t = RECENT_LOGS_DEFAULT )]
  pub recent: usize,
  // -j print the marker set as a GeoJSON feature collection
  #[clap(short = 'j', long)]
  pub geojson: bool,
}
