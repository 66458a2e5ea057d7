use geo::Coord;

/// Meters per degree at equator
const METERS_PER_DEGREE: f64 = 111320.0;

/// Equirectangular projection from WGS84 to local meters and back
///
/// Uses approximation suitable for fairway-scale geometry:
/// - x = (lon - center_lon) * cos(center_lat) * 111320
/// - y = (lat - center_lat) * 111320
///
/// Accurate enough for the few kilometers a route leg or a width probe spans.
/// Coordinates are `x = lon, y = lat` on the geographic side, matching GeoJSON order.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    center_lat: f64,
    center_lon: f64,
    cos_lat: f64,
}

impl Projector {
    /// Create a new projector centered at `center` (`x = lon, y = lat`)
    pub fn new(center: Coord<f64>) -> Self {
        Self {
            center_lat: center.y,
            center_lon: center.x,
            cos_lat: center.y.to_radians().cos(),
        }
    }

    /// Project a lon/lat coordinate to local meters around the center
    pub fn project(&self, lon_lat: Coord<f64>) -> Coord<f64> {
        geo::coord! {
            x: (lon_lat.x - self.center_lon) * self.cos_lat * METERS_PER_DEGREE,
            y: (lon_lat.y - self.center_lat) * METERS_PER_DEGREE,
        }
    }

    /// Inverse of [`Projector::project`]
    pub fn unproject(&self, local: Coord<f64>) -> Coord<f64> {
        geo::coord! {
            x: self.center_lon + local.x / (self.cos_lat * METERS_PER_DEGREE),
            y: self.center_lat + local.y / METERS_PER_DEGREE,
        }
    }
}
