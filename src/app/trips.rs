use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::constants::TRIPS_STORAGE_KEY;
use crate::data::storage::KeyValueStore;
use super::date_conv::date_sort_key;

/*
* A planned trip as stored by the route planner. Unlike raw place
* records these round-trip through our own storage, so serde defaults
* cover missing fields instead of a hand-rolled normalizer.
*/
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Trip {
  pub id: u32,
  pub destination: String,
  #[serde(rename = "startDate")]
  pub start_date: String,
  #[serde(rename = "endDate")]
  pub end_date: String,
  pub travelers: u32,
  pub status: String,
  pub budget: String,
  pub accommodation: String,
  pub image: String,
}

impl Default for Trip {
  fn default() -> Self {
    Trip {
      id: 0,
      destination: "".to_owned(),
      start_date: "".to_owned(),
      end_date: "".to_owned(),
      travelers: 0,
      status: "Planning".to_owned(),
      budget: "".to_owned(),
      accommodation: "".to_owned(),
      image: "".to_owned(),
    }
  }
}

pub fn default_trips() -> Vec<Trip> {
  vec![
    Trip {
      id: 1,
      destination: "Barcelona, Spain".to_owned(),
      start_date: "March 15, 2026".to_owned(),
      end_date: "March 22, 2026".to_owned(),
      travelers: 2,
      status: "Confirmed".to_owned(),
      budget: "$3,500".to_owned(),
      accommodation: "Hotel".to_owned(),
      image: "https://images.unsplash.com/photo-1676749467838-e85a864205fc?w=1080&q=80".to_owned(),
    },
    Trip {
      id: 2,
      destination: "Iceland Road Trip".to_owned(),
      start_date: "June 10, 2026".to_owned(),
      end_date: "June 20, 2026".to_owned(),
      travelers: 4,
      status: "Planning".to_owned(),
      budget: "$6,000".to_owned(),
      accommodation: "Airbnb".to_owned(),
      image: "https://images.unsplash.com/photo-1595368062405-e4d7840cba14?w=1080&q=80".to_owned(),
    },
    Trip {
      id: 3,
      destination: "Maldives".to_owned(),
      start_date: "August 5, 2026".to_owned(),
      end_date: "August 12, 2026".to_owned(),
      travelers: 2,
      status: "Confirmed".to_owned(),
      budget: "$5,500".to_owned(),
      accommodation: "Resort".to_owned(),
      image: "https://images.unsplash.com/photo-1714412192114-61dca8f15f68?w=1080&q=80".to_owned(),
    },
  ]
}

/*
* First run seeds the default trips so the planner never opens empty.
* A stored value that no longer parses is treated as no trips at all.
*/
pub fn load_trips(store: &dyn KeyValueStore) -> Vec<Trip> {
  match store.get(TRIPS_STORAGE_KEY) {
    Some(raw) => match serde_json::from_str::<Vec<Trip>>(&raw) {
      Ok(trips) => trips,
      Err(err) => {
        warn!(%err, "stored trips are unreadable, starting from none");
        vec![]
      }
    },
    None => {
      let seeded = default_trips();
      save_trips(store, &seeded);
      seeded
    }
  }
}

pub fn save_trips(store: &dyn KeyValueStore, trips: &[Trip]) {
  match serde_json::to_string(trips) {
    Ok(encoded) => store.set(TRIPS_STORAGE_KEY, &encoded),
    Err(err) => warn!(%err, "could not encode trips for storage"),
  }
}

pub fn delete_trip(store: &dyn KeyValueStore, id: u32) -> Vec<Trip> {
  let mut trips = load_trips(store);
  trips.retain(|trip| trip.id != id);
  save_trips(store, &trips);
  trips
}

/* Soonest departure first; undated trips float to the top via key 0 */
pub fn sort_by_start_date(trips: &mut [Trip]) {
  trips.sort_by_key(|trip| date_sort_key(&trip.start_date));
}
