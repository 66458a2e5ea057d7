use geo::{Coord, Line};

use crate::geometry::Primitives;

/// Nearest point on a polyline to some query point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    pub coord: Coord<f64>,
    /// Index of the segment start vertex
    pub segment_index: usize,
    /// Position along that segment, 0 at its start and 1 at its end
    pub fraction: f64,
    /// Distance from the query point to `coord`
    pub distance: f64,
}

/// Snap `point` onto `line`
///
/// Zero-length segments carry no direction and are skipped, so a line
/// without any usable segment yields `None`. Ties keep the earlier segment.
pub fn snap_to_line<P: Primitives>(
    primitives: &P,
    line: &[Coord<f64>],
    point: Coord<f64>,
) -> Option<Snap> {
    let mut best: Option<Snap> = None;

    for (segment_index, pair) in line.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let length = primitives.distance(a, b);
        if length == 0.0 {
            continue;
        }

        let Some(coord) = primitives.nearest_on_segment(Line::new(a, b), point) else {
            continue;
        };
        let distance = primitives.distance(point, coord);

        if best.is_none_or(|snap| distance < snap.distance) {
            best = Some(Snap {
                coord,
                segment_index,
                fraction: (primitives.distance(a, coord) / length).clamp(0.0, 1.0),
                distance,
            });
        }
    }

    best
}
