use geo::Coord;

use super::arc::corner_coords;
use crate::config::RouteConfig;
use crate::domain::Waypoint;
use crate::geometry::{Planar, Primitives};

/// Build a smoothed route through `waypoints` with planar primitives
///
/// See [`build_route_with`].
pub fn build_route(waypoints: &[Waypoint], config: &RouteConfig) -> Vec<Coord<f64>> {
    build_route_with(&Planar, waypoints, config)
}

/// Build a smoothed route through `waypoints`
///
/// # Algorithm
/// 1. Keep the first waypoint as is
/// 2. For every interior waypoint, fit a turning arc of its radius tangent
///    to both adjoining legs, falling back to the bare waypoint
/// 3. Keep the last waypoint as is
///
/// # Returns
/// Empty for no waypoints, the single coordinate for one waypoint,
/// otherwise a continuous polyline whose ends equal the end waypoints.
pub fn build_route_with<P: Primitives>(
    primitives: &P,
    waypoints: &[Waypoint],
    config: &RouteConfig,
) -> Vec<Coord<f64>> {
    let (first, last) = match waypoints {
        [] => return Vec::new(),
        [only] => return vec![only.coord],
        [first, .., last] => (first, last),
    };

    let per_corner = config.arc_step_count() + 1;
    let mut route =
        Vec::with_capacity((waypoints.len() - 2).saturating_mul(per_corner).saturating_add(2));
    route.push(first.coord);

    for window in waypoints.windows(3) {
        route.extend(corner_coords(
            primitives,
            window[0].coord,
            &window[1],
            window[2].coord,
            config,
        ));
    }

    route.push(last.coord);

    log::debug!(
        "Built route from {} waypoints into {} coordinates",
        waypoints.len(),
        route.len()
    );

    route
}

/// Total polyline length of a route
pub fn route_length(coords: &[Coord<f64>]) -> f64 {
    coords.windows(2).map(|w| Planar.distance(w[0], w[1])).sum()
}
