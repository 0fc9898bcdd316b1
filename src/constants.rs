pub const NOMINATIM_API_BASE: &str = "https://nominatim.openstreetmap.org";
pub const ACCEPT_LANGUAGE_DEFAULT: &str = "en";
pub const USER_AGENT_DEFAULT: &str = "travelmap/0.1";

/* Key-value store keys shared with the journal pages */
pub const PLACES_STORAGE_KEY: &str = "visitedPlaces";
pub const TRIPS_STORAGE_KEY: &str = "plannedTrips";

pub const FIXTURE_URL_DEFAULT: &str = "dummy_places/places.json";
pub const STORAGE_PATH_DEFAULT: &str = "travelmap_storage.json";

pub const BATCH_SIZE_DEFAULT: usize = 5;
pub const BATCH_DELAY_MS_DEFAULT: u64 = 500;
pub const REQUEST_TIMEOUT_SECS_DEFAULT: u64 = 15;

/* Soft defaults applied when raw records are missing fields */
pub const DATE_PLACEHOLDER: &str = "—";
pub const UNKNOWN_PLACE_NAME: &str = "Unknown";
pub const UNNAMED_PLACE_LABEL: &str = "Unnamed place";
pub const DEFAULT_RATING: u32 = 5;
pub const MAX_RATING: u32 = 5;
pub const DEFAULT_PLACE_IMAGE: &str =
  "https://images.unsplash.com/photo-1488646953014-85cb44e25828?w=800&q=80";

/* Standard XYZ tile source for widgets that render real tiles */
pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

pub const FIT_PADDING_FRACTION: f64 = 0.2;
pub const RECENT_LOGS_DEFAULT: usize = 2;
