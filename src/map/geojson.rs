use serde_json::{json, Value};

use crate::app::coords::Bounds;
use super::view::{MapWidget, MarkerHandle};

/*
* Headless widget for the CLI: collects markers into a GeoJSON
* FeatureCollection and remembers the fitted viewport as its bbox.
*/
#[derive(Default)]
pub struct GeoJsonMap {
  features: Vec<Value>,
  viewport: Option<Bounds>,
}

impl GeoJsonMap {
  pub fn new() -> Self {
    GeoJsonMap::default()
  }

  pub fn marker_count(&self) -> usize {
    self.features.len()
  }

  pub fn viewport(&self) -> Option<Bounds> {
    self.viewport
  }

  pub fn feature_collection(&self) -> Value {
    let mut collection = json!({
      "type": "FeatureCollection",
      "features": self.features,
    });
    if let Some(bounds) = self.viewport {
      collection["bbox"] = json!([bounds.west, bounds.south, bounds.east, bounds.north]);
    }
    collection
  }
}

impl MapWidget for GeoJsonMap {
  fn add_marker(&mut self, lat: f64, lon: f64, popup_html: &str) -> MarkerHandle {
    // GeoJSON positions are [lon, lat]
    self.features.push(json!({
      "type": "Feature",
      "geometry": { "type": "Point", "coordinates": [lon, lat] },
      "properties": { "popup": popup_html },
    }));
    self.features.len() - 1
  }

  fn fit_bounds(&mut self, bounds: &Bounds, padding_fraction: f64) {
    self.viewport = Some(bounds.pad(padding_fraction));
  }

  fn invalidate_size(&mut self) {
    // nothing to redraw off screen
  }
}
