use geo::{Coord, Line, Polygon};

use super::snap::snap_to_line;
use crate::config::ProbeConfig;
use crate::domain::CrossSection;
use crate::geometry::{Planar, Primitives};

/// Measure the fairway area width at `point` with planar primitives
///
/// See [`probe_width_with`].
pub fn probe_width(
    point: Coord<f64>,
    line: &[Coord<f64>],
    areas: &[Polygon<f64>],
    config: &ProbeConfig,
) -> Option<CrossSection> {
    probe_width_with(&Planar, point, line, areas, config)
}

/// Measure the fairway area width at `point`
///
/// # Algorithm
/// 1. Snap `point` onto the navigation `line`
/// 2. Require exactly one of `areas` to contain the snapped point
/// 3. Cast probes perpendicular to the local line direction, one at
///    azimuth - 90 and one at + 90
/// 4. On each side take the nearest boundary hit within the search cutoff
///
/// # Returns
/// The span between the two boundary hits, or `None` when the containing
/// area is missing or ambiguous, or either side finds no boundary.
pub fn probe_width_with<P: Primitives>(
    primitives: &P,
    point: Coord<f64>,
    line: &[Coord<f64>],
    areas: &[Polygon<f64>],
    config: &ProbeConfig,
) -> Option<CrossSection> {
    let Some(snap) = snap_to_line(primitives, line, point) else {
        log::debug!("Navigation line has no usable segment");
        return None;
    };

    let containing: Vec<&Polygon<f64>> = areas
        .iter()
        .filter(|area| primitives.contains(area, snap.coord))
        .collect();
    let [area] = containing.as_slice() else {
        log::debug!(
            "{} areas contain snap point ({:.3}, {:.3}), expected exactly one",
            containing.len(),
            snap.coord.x,
            snap.coord.y
        );
        return None;
    };

    let heading = primitives.azimuth(line[snap.segment_index], line[snap.segment_index + 1]);

    let start = nearest_boundary_hit(primitives, area, snap.coord, heading - 90.0, config)?;
    let end = nearest_boundary_hit(primitives, area, snap.coord, heading + 90.0, config)?;

    Some(CrossSection {
        start,
        end,
        width: primitives.distance(start, end),
    })
}

/// Closest crossing of a probe cast from `origin` with the area boundary
fn nearest_boundary_hit<P: Primitives>(
    primitives: &P,
    area: &Polygon<f64>,
    origin: Coord<f64>,
    azimuth: f64,
    config: &ProbeConfig,
) -> Option<Coord<f64>> {
    // A negative length would cast toward the opposite side
    let probe = Line::new(
        origin,
        primitives.destination(origin, config.probe_length_m.abs(), azimuth),
    );

    let hit = boundary_edges(area)
        .filter_map(|edge| primitives.segment_intersection(probe, edge))
        .map(|hit| (primitives.distance(origin, hit), hit))
        .filter(|(distance, _)| *distance <= config.search_cutoff_m)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, hit)| hit);

    if hit.is_none() {
        log::debug!(
            "No boundary within {} m of ({:.3}, {:.3}) at azimuth {:.1}",
            config.search_cutoff_m,
            origin.x,
            origin.y,
            azimuth
        );
    }

    hit
}

/// Edges of the exterior ring and of every island ring
fn boundary_edges(area: &Polygon<f64>) -> impl Iterator<Item = Line<f64>> + '_ {
    std::iter::once(area.exterior())
        .chain(area.interiors())
        .flat_map(|ring| ring.lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo::{LineString, coord, polygon};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        polygon![(x: x0, y: y0), (x: x0, y: y1), (x: x1, y: y1), (x: x1, y: y0)]
    }

    fn line_y(y: f64, x0: f64, x1: f64) -> Vec<Coord<f64>> {
        vec![coord! { x: x0, y: y }, coord! { x: x1, y: y }]
    }

    fn assert_coord(actual: Coord<f64>, x: f64, y: f64) {
        assert_abs_diff_eq!(actual.x, x, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.y, y, epsilon = 1e-9);
    }

    #[test]
    fn test_rectangle_scenario() {
        let section = probe_width(
            coord! { x: 10.0, y: 5.0 },
            &line_y(5.0, 0.0, 20.0),
            &[rect(0.0, 0.0, 20.0, 10.0)],
            &ProbeConfig::default(),
        )
        .unwrap();

        assert_coord(section.start, 10.0, 0.0);
        assert_coord(section.end, 10.0, 10.0);
        assert_abs_diff_eq!(section.width, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_off_line_query_is_snapped() {
        let section = probe_width(
            coord! { x: 10.0, y: 8.5 },
            &line_y(5.0, 0.0, 20.0),
            &[rect(0.0, 0.0, 20.0, 10.0)],
            &ProbeConfig::default(),
        )
        .unwrap();
        assert_coord(section.start, 10.0, 0.0);
        assert_coord(section.end, 10.0, 10.0);
    }

    #[test]
    fn test_no_containing_area() {
        let section = probe_width(
            coord! { x: 10.0, y: 5.0 },
            &line_y(5.0, 0.0, 20.0),
            &[rect(30.0, 0.0, 50.0, 10.0)],
            &ProbeConfig::default(),
        );
        assert!(section.is_none());
        assert!(
            probe_width(
                coord! { x: 10.0, y: 5.0 },
                &line_y(5.0, 0.0, 20.0),
                &[],
                &ProbeConfig::default()
            )
            .is_none()
        );
    }

    #[test]
    fn test_overlapping_areas_are_ambiguous() {
        let areas = [rect(0.0, 0.0, 20.0, 10.0), rect(5.0, 2.0, 25.0, 12.0)];
        let line = line_y(5.0, 0.0, 30.0);

        // Inside both rectangles
        let both = probe_width(coord! { x: 10.0, y: 5.0 }, &line, &areas, &ProbeConfig::default());
        assert!(both.is_none());

        // Only the second rectangle reaches x = 22
        let single =
            probe_width(coord! { x: 22.0, y: 5.0 }, &line, &areas, &ProbeConfig::default())
                .unwrap();
        assert_coord(single.start, 22.0, 2.0);
        assert_coord(single.end, 22.0, 12.0);
    }

    #[test]
    fn test_winding_does_not_matter() {
        let forward = rect(0.0, 0.0, 20.0, 10.0);
        let mut reversed_ring: Vec<Coord<f64>> = forward.exterior().0.clone();
        reversed_ring.reverse();
        let reversed = Polygon::new(LineString::new(reversed_ring), vec![]);

        let line = line_y(5.0, 0.0, 20.0);
        let point = coord! { x: 7.0, y: 5.0 };
        let a = probe_width(point, &line, &[forward], &ProbeConfig::default()).unwrap();
        let b = probe_width(point, &line, &[reversed], &ProbeConfig::default()).unwrap();

        assert_coord(b.start, a.start.x, a.start.y);
        assert_coord(b.end, a.end.x, a.end.y);
        assert_abs_diff_eq!(a.width, b.width, epsilon = 1e-9);
    }

    #[test]
    fn test_width_matches_endpoints() {
        let area = polygon![
            (x: 0.0, y: 0.0),
            (x: 40.0, y: -6.0),
            (x: 90.0, y: 3.0),
            (x: 85.0, y: 30.0),
            (x: 30.0, y: 26.0),
            (x: -5.0, y: 18.0),
        ];
        let line = vec![
            coord! { x: 5.0, y: 10.0 },
            coord! { x: 45.0, y: 12.0 },
            coord! { x: 80.0, y: 16.0 },
        ];
        let section =
            probe_width(coord! { x: 60.0, y: 11.0 }, &line, &[area], &ProbeConfig::default())
                .unwrap();

        assert!(section.width >= 0.0);
        assert_abs_diff_eq!(
            section.width,
            Planar.distance(section.start, section.end),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_follows_local_line_direction() {
        let area = rect(0.0, 0.0, 10.0, 10.0);
        let diagonal = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 }];
        let section =
            probe_width(coord! { x: 5.0, y: 5.0 }, &diagonal, &[area], &ProbeConfig::default())
                .unwrap();

        assert_coord(section.start, 10.0, 0.0);
        assert_coord(section.end, 0.0, 10.0);
        assert_abs_diff_eq!(section.width, 200f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_search_cutoff_limits_each_side() {
        let area = rect(0.0, 0.0, 200.0, 100.0);
        let line = line_y(30.0, 0.0, 200.0);
        let point = coord! { x: 100.0, y: 30.0 };

        let tight = ProbeConfig::default().with_search_cutoff(50.0);
        assert!(probe_width(point, &line, &[area.clone()], &tight).is_none());

        let short = ProbeConfig::default().with_probe_length(50.0);
        assert!(probe_width(point, &line, &[area.clone()], &short).is_none());

        let loose = ProbeConfig::default().with_search_cutoff(100.0);
        let section = probe_width(point, &line, &[area], &loose).unwrap();
        assert_abs_diff_eq!(section.width, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_probe_length_keeps_sides() {
        let config = ProbeConfig::default().with_probe_length(-5000.0);
        let section = probe_width(
            coord! { x: 10.0, y: 5.0 },
            &line_y(5.0, 0.0, 20.0),
            &[rect(0.0, 0.0, 20.0, 10.0)],
            &config,
        )
        .unwrap();

        assert_coord(section.start, 10.0, 0.0);
        assert_coord(section.end, 10.0, 10.0);
    }

    #[test]
    fn test_island_bounds_the_span() {
        let island = LineString::from(vec![(40.0, 60.0), (60.0, 60.0), (60.0, 80.0), (40.0, 80.0)]);
        let area = Polygon::new(rect(0.0, 0.0, 100.0, 100.0).exterior().clone(), vec![island]);

        let section = probe_width(
            coord! { x: 50.0, y: 30.0 },
            &line_y(30.0, 0.0, 100.0),
            &[area],
            &ProbeConfig::default(),
        )
        .unwrap();

        assert_coord(section.start, 50.0, 0.0);
        assert_coord(section.end, 50.0, 60.0);
        assert_abs_diff_eq!(section.width, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_line() {
        let point = coord! { x: 10.0, y: 5.0 };
        let areas = [rect(0.0, 0.0, 20.0, 10.0)];
        assert!(probe_width(point, &[], &areas, &ProbeConfig::default()).is_none());
        assert!(probe_width(point, &[point], &areas, &ProbeConfig::default()).is_none());
    }
}
