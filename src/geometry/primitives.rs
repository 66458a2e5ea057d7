use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Closest, ClosestPoint, Coord, Intersects, Line, Point, Polygon};

/// Planar geometry operations the route builder and width probe are built on.
///
/// Azimuths are degrees in `[0, 360)`, measured from the +x axis rotating
/// toward +y. With the y axis pointing down (screen and chart-raster space)
/// this reads clockwise, so "right" and "clockwise" below refer to that frame.
pub trait Primitives {
    /// Azimuth of the direction `from -> to`
    fn azimuth(&self, from: Coord<f64>, to: Coord<f64>) -> f64;

    fn distance(&self, a: Coord<f64>, b: Coord<f64>) -> f64;

    /// Translate `origin` by `distance` along `azimuth`
    fn destination(&self, origin: Coord<f64>, distance: f64, azimuth: f64) -> Coord<f64>;

    /// Intersection of two segments, only when it is exactly one point.
    ///
    /// Disjoint and colinear-overlapping segments both yield `None`.
    fn segment_intersection(&self, a: Line<f64>, b: Line<f64>) -> Option<Coord<f64>>;

    /// Point-in-polygon test; points on a ring count as inside
    fn contains(&self, polygon: &Polygon<f64>, point: Coord<f64>) -> bool;

    /// Closest point on `segment` to `point`, `None` if it cannot be determined
    fn nearest_on_segment(&self, segment: Line<f64>, point: Coord<f64>) -> Option<Coord<f64>>;

    /// Sample a circular arc around `center`
    ///
    /// Walks in increasing azimuth from `start_azimuth` to `end_azimuth`
    /// (lifted by a full turn when it is smaller) and returns `steps + 1`
    /// coordinates including both ends. Equal azimuths give a single coordinate.
    fn sample_arc(
        &self,
        center: Coord<f64>,
        radius: f64,
        start_azimuth: f64,
        end_azimuth: f64,
        steps: usize,
    ) -> Vec<Coord<f64>> {
        let start = normalize_azimuth(start_azimuth);
        let mut end = normalize_azimuth(end_azimuth);

        if start == end {
            return vec![self.destination(center, radius, start)];
        }
        if end < start {
            end += 360.0;
        }

        let steps = steps.max(1);
        let step = (end - start) / steps as f64;

        (0..=steps)
            .map(|i| {
                let azimuth = if i == steps {
                    end
                } else {
                    start + step * i as f64
                };
                self.destination(center, radius, azimuth)
            })
            .collect()
    }
}

/// Euclidean primitives backed by the `geo` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Planar;

impl Primitives for Planar {
    fn azimuth(&self, from: Coord<f64>, to: Coord<f64>) -> f64 {
        let angle = (to.y - from.y).atan2(to.x - from.x).to_degrees();
        normalize_azimuth(angle)
    }

    fn distance(&self, a: Coord<f64>, b: Coord<f64>) -> f64 {
        (b.x - a.x).hypot(b.y - a.y)
    }

    fn destination(&self, origin: Coord<f64>, distance: f64, azimuth: f64) -> Coord<f64> {
        let (sin, cos) = azimuth.to_radians().sin_cos();
        geo::coord! {
            x: origin.x + distance * cos,
            y: origin.y + distance * sin,
        }
    }

    fn segment_intersection(&self, a: Line<f64>, b: Line<f64>) -> Option<Coord<f64>> {
        match line_intersection(a, b)? {
            LineIntersection::SinglePoint { intersection, .. } => Some(intersection),
            LineIntersection::Collinear { .. } => None,
        }
    }

    fn contains(&self, polygon: &Polygon<f64>, point: Coord<f64>) -> bool {
        polygon.intersects(&Point::from(point))
    }

    fn nearest_on_segment(&self, segment: Line<f64>, point: Coord<f64>) -> Option<Coord<f64>> {
        match segment.closest_point(&Point::from(point)) {
            Closest::Intersection(p) | Closest::SinglePoint(p) => Some(p.0),
            Closest::Indeterminate => None,
        }
    }
}

/// Map any angle in degrees onto `[0, 360)`
pub fn normalize_azimuth(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
