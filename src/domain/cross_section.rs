use geo::{Coord, LineString};

/// Perpendicular span of a fairway area at a probed point
///
/// `start` is the hit at line azimuth - 90 and `end` the hit at + 90. That is
/// port then starboard when y grows downward. In a north-up frame, such as a
/// projected WGS84 request, the two sides are mirrored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    /// Boundary hit at line azimuth - 90
    pub start: Coord<f64>,
    /// Boundary hit at line azimuth + 90
    pub end: Coord<f64>,
    /// Distance between `start` and `end` in meters
    pub width: f64,
}

impl CrossSection {
    /// Two-point line from `start` to `end`
    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::new(vec![self.start, self.end])
    }
}
