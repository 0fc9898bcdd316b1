use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Coords {
  pub lat: f64,
  pub lon: f64,
}

impl Coords {
  pub fn new(lat: f64, lon: f64) -> Self {
    Coords {
      lat,
      lon,
    }
  }

  /*
  * 0º N, 0º E as a neutral starting viewpoint
  */
  pub fn zero() -> Self {
    Coords {
      lat: 0f64,
      lon: 0f64,
    }
  }
}

/*
* Geographic bounding box, grown point by point as markers land.
* The union of two boxes is commutative, so the insertion order of
* markers never changes the final viewport.
*/
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
  pub south: f64,
  pub west: f64,
  pub north: f64,
  pub east: f64,
}

impl Bounds {
  pub fn from_point(point: Coords) -> Self {
    Bounds {
      south: point.lat,
      west: point.lon,
      north: point.lat,
      east: point.lon,
    }
  }

  pub fn extend(&mut self, point: Coords) {
    if point.lat < self.south {
      self.south = point.lat;
    }
    if point.lat > self.north {
      self.north = point.lat;
    }
    if point.lon < self.west {
      self.west = point.lon;
    }
    if point.lon > self.east {
      self.east = point.lon;
    }
  }

  /*
  * Expand each dimension by the given fraction of its span,
  * split evenly between both edges.
  */
  pub fn pad(&self, fraction: f64) -> Bounds {
    let lat_margin = (self.north - self.south) * fraction / 2f64;
    let lon_margin = (self.east - self.west) * fraction / 2f64;
    Bounds {
      south: self.south - lat_margin,
      west: self.west - lon_margin,
      north: self.north + lat_margin,
      east: self.east + lon_margin,
    }
  }

  pub fn center(&self) -> Coords {
    Coords::new((self.south + self.north) / 2f64, (self.west + self.east) / 2f64)
  }
}
