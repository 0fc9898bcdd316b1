use crate::app::coords::{Bounds, Coords};
use crate::app::place::NormalizedPlace;
use crate::constants::FIT_PADDING_FRACTION;

pub type MarkerHandle = usize;

/*
* Capability interface over whatever actually draws the map. The core
* pipeline only ever talks to this trait; a Leaflet-backed page, a
* GeoJSON writer and the test doubles all sit behind it.
*/
pub trait MapWidget {
  fn add_marker(&mut self, lat: f64, lon: f64, popup_html: &str) -> MarkerHandle;
  fn fit_bounds(&mut self, bounds: &Bounds, padding_fraction: f64);
  fn invalidate_size(&mut self);
}

/*
* Owns the markers of one load cycle. Dropped once the viewport has
* been fitted.
*/
#[derive(Default)]
pub struct MarkerGroup {
  points: Vec<Coords>,
  handles: Vec<MarkerHandle>,
}

impl MarkerGroup {
  pub fn new() -> Self {
    MarkerGroup::default()
  }

  pub fn add(&mut self, handle: MarkerHandle, point: Coords) {
    self.handles.push(handle);
    self.points.push(point);
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  pub fn bounds(&self) -> Option<Bounds> {
    let mut points = self.points.iter();
    let mut bounds = Bounds::from_point(*points.next()?);
    for point in points {
      bounds.extend(*point);
    }
    Some(bounds)
  }
}

pub fn escape_html(raw: &str) -> String {
  raw
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
    .replace('\'', "&#39;")
}

/*
* Popup body for a marker. Every interpolated field is escaped; place
* names and notes are user input.
*/
pub fn popup_html(place: &NormalizedPlace) -> String {
  format!(
    "<b>{}</b><br>Visited: {}<br>{}",
    escape_html(&place.display_name),
    escape_html(&place.date_visited),
    escape_html(&place.description)
  )
}

pub fn place_marker<W: MapWidget>(
  widget: &mut W,
  group: &mut MarkerGroup,
  place: &NormalizedPlace,
  coords: Coords,
) {
  let handle = widget.add_marker(coords.lat, coords.lon, &popup_html(place));
  group.add(handle, coords);
}

/*
* Fit the viewport around every placed marker, padded by a fifth of
* each span. Zero markers leave the viewport untouched.
*/
pub fn fit_to_markers<W: MapWidget>(widget: &mut W, group: &MarkerGroup) {
  if let Some(bounds) = group.bounds() {
    widget.fit_bounds(&bounds, FIT_PADDING_FRACTION);
  }
}

#[cfg(test)]
pub mod test_widget {
  use super::*;

  /* Records every call so tests can assert on marker traffic */
  #[derive(Default)]
  pub struct RecordingMap {
    pub markers: Vec<(f64, f64, String)>,
    pub fitted: Option<(Bounds, f64)>,
    pub size_invalidations: usize,
  }

  impl MapWidget for RecordingMap {
    fn add_marker(&mut self, lat: f64, lon: f64, popup_html: &str) -> MarkerHandle {
      self.markers.push((lat, lon, popup_html.to_owned()));
      self.markers.len() - 1
    }

    fn fit_bounds(&mut self, bounds: &Bounds, padding_fraction: f64) {
      self.fitted = Some((*bounds, padding_fraction));
    }

    fn invalidate_size(&mut self) {
      self.size_invalidations += 1;
    }
  }
}
