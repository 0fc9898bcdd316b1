use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use http_cache_reqwest::{Cache, CacheMode, CACacheManager, HttpCache};

/*
* HTTP client for fixture fetches. Responses are cached on disk under
* standard HTTP cache rules, so repeated loads of the static places
* document skip the network the way a browser would.
*/
pub fn build_cached_http_client(timeout: Duration) -> ClientWithMiddleware {
  let inner = Client::builder()
    .timeout(timeout)
    .build()
    .unwrap_or_else(|_| Client::new());
  ClientBuilder::new(inner)
    .with(Cache(HttpCache {
      mode: CacheMode::Default,
      manager: CACacheManager::default(),
      options: None,
    }))
    .build()
}
