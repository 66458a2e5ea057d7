use geo::{Coord, LineString, Polygon};
use serde::Deserialize;
use std::path::Path;

use super::error::RequestError;
use crate::domain::Waypoint;
use crate::geometry::{Projector, nautical_miles_to_meters};

/// Coordinate reference of request coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crs {
    /// Already planar, in meters
    #[default]
    Projected,
    /// `[lon, lat]` degrees
    Wgs84,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusUnit {
    #[default]
    Meters,
    NauticalMiles,
}

/// Planar working frame of a request
///
/// Geographic requests are projected around an anchor coordinate and
/// results are mapped back before output.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    projector: Option<Projector>,
}

impl Frame {
    pub fn planar() -> Self {
        Self { projector: None }
    }

    /// Geographic frames are north-up, so y grows upward and turn and
    /// probe sides are mirrored relative to a y-down planar frame.
    fn for_crs(crs: Crs, anchor: Coord<f64>) -> Self {
        match crs {
            Crs::Projected => Self::planar(),
            Crs::Wgs84 => Self {
                projector: Some(Projector::new(anchor)),
            },
        }
    }

    pub fn to_local(&self, coord: Coord<f64>) -> Coord<f64> {
        match &self.projector {
            Some(projector) => projector.project(coord),
            None => coord,
        }
    }

    /// Map a local coordinate back to the request's reference
    pub fn to_output(&self, coord: Coord<f64>) -> Coord<f64> {
        match &self.projector {
            Some(projector) => projector.unproject(coord),
            None => coord,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WaypointEntry {
    pub coordinates: [f64; 2],
    #[serde(default)]
    pub turn_radius: f64,
}

/// Raw route request as read from JSON
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub crs: Crs,
    #[serde(default)]
    pub radius_unit: RadiusUnit,
    pub waypoints: Vec<WaypointEntry>,
}

/// Route request resolved into the planar frame
#[derive(Debug, Clone)]
pub struct RouteInput {
    pub frame: Frame,
    pub waypoints: Vec<Waypoint>,
}

impl RouteRequest {
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, RequestError> {
        Self::from_json(&read_request(path)?)
    }

    /// Project coordinates and convert radii to meters
    pub fn resolve(&self) -> Result<RouteInput, RequestError> {
        let frame = match self.waypoints.first() {
            Some(first) => Frame::for_crs(self.crs, to_coord(first.coordinates)),
            None => Frame::planar(),
        };

        let waypoints = self
            .waypoints
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                if !entry.turn_radius.is_finite() || entry.turn_radius < 0.0 {
                    return Err(RequestError::InvalidTurnRadius {
                        index,
                        value: entry.turn_radius,
                    });
                }
                let radius = match self.radius_unit {
                    RadiusUnit::Meters => entry.turn_radius,
                    RadiusUnit::NauticalMiles => nautical_miles_to_meters(entry.turn_radius),
                };
                Ok(Waypoint::new(
                    frame.to_local(to_coord(entry.coordinates)),
                    radius,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteInput { frame, waypoints })
    }
}

/// Raw width probe request as read from JSON
///
/// `areas` uses GeoJSON polygon coordinates: exterior ring first, then islands.
#[derive(Debug, Deserialize)]
pub struct ProbeRequest {
    #[serde(default)]
    pub crs: Crs,
    pub point: [f64; 2],
    pub line: Vec<[f64; 2]>,
    #[serde(default)]
    pub areas: Vec<Vec<Vec<[f64; 2]>>>,
}

/// Probe request resolved into the planar frame
#[derive(Debug, Clone)]
pub struct ProbeInput {
    pub frame: Frame,
    pub point: Coord<f64>,
    pub line: Vec<Coord<f64>>,
    pub areas: Vec<Polygon<f64>>,
}

impl ProbeRequest {
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, RequestError> {
        Self::from_json(&read_request(path)?)
    }

    /// Project coordinates and build area polygons
    ///
    /// Areas whose exterior ring has fewer than 3 vertices are skipped.
    pub fn resolve(&self) -> ProbeInput {
        let frame = Frame::for_crs(self.crs, to_coord(self.point));
        let local_ring = |ring: &[[f64; 2]]| -> LineString<f64> {
            ring.iter().map(|&c| frame.to_local(to_coord(c))).collect()
        };

        let mut areas = Vec::with_capacity(self.areas.len());
        for (index, rings) in self.areas.iter().enumerate() {
            let Some((exterior, interiors)) = rings.split_first() else {
                log::warn!("Skipping area {}: no rings", index);
                continue;
            };
            if distinct_vertices(exterior) < 3 {
                log::warn!(
                    "Skipping area {}: exterior ring has fewer than 3 vertices",
                    index
                );
                continue;
            }
            areas.push(Polygon::new(
                local_ring(exterior),
                interiors.iter().map(|ring| local_ring(ring)).collect(),
            ));
        }

        ProbeInput {
            frame,
            point: frame.to_local(to_coord(self.point)),
            line: self
                .line
                .iter()
                .map(|&c| frame.to_local(to_coord(c)))
                .collect(),
            areas,
        }
    }
}

fn read_request(path: &Path) -> Result<String, RequestError> {
    std::fs::read_to_string(path).map_err(|source| RequestError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn to_coord([x, y]: [f64; 2]) -> Coord<f64> {
    geo::coord! { x: x, y: y }
}

/// Vertex count ignoring the closing repeat of the first vertex
fn distinct_vertices(ring: &[[f64; 2]]) -> usize {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => ring.len() - 1,
        _ => ring.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_route_request_defaults() {
        let request = RouteRequest::from_json(
            r#"{
                "waypoints": [
                    {"coordinates": [0.0, 0.0]},
                    {"coordinates": [10.0, 0.0], "turn_radius": 2.0},
                    {"coordinates": [10.0, 10.0]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(request.crs, Crs::Projected);
        assert_eq!(request.radius_unit, RadiusUnit::Meters);

        let input = request.resolve().unwrap();
        assert_eq!(input.waypoints.len(), 3);
        assert_eq!(input.waypoints[0].turn_radius, 0.0);
        assert_eq!(input.waypoints[1].turn_radius, 2.0);
        assert_eq!(input.waypoints[2].coord, geo::coord! { x: 10.0, y: 10.0 });
    }

    #[test]
    fn test_nautical_mile_radii_are_converted() {
        let request = RouteRequest::from_json(
            r#"{
                "radius_unit": "nautical_miles",
                "waypoints": [{"coordinates": [0.0, 0.0], "turn_radius": 0.5}]
            }"#,
        )
        .unwrap();
        let input = request.resolve().unwrap();
        assert_eq!(input.waypoints[0].turn_radius, 926.0);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let request = RouteRequest::from_json(
            r#"{"waypoints": [
                {"coordinates": [0.0, 0.0]},
                {"coordinates": [1.0, 0.0], "turn_radius": -4.0}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            request.resolve(),
            Err(RequestError::InvalidTurnRadius { index: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            RouteRequest::from_json(r#"{"waypoints": [{"coordinates": [1.0]}]}"#),
            Err(RequestError::Json(_))
        ));
        assert!(matches!(
            ProbeRequest::from_json("not json"),
            Err(RequestError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = RouteRequest::from_path(Path::new("/nonexistent/route.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/route.json"));
    }

    #[test]
    fn test_wgs84_route_is_projected_around_first_waypoint() {
        let request = RouteRequest::from_json(
            r#"{
                "crs": "wgs84",
                "waypoints": [
                    {"coordinates": [24.95, 60.15]},
                    {"coordinates": [24.96, 60.16]}
                ]
            }"#,
        )
        .unwrap();
        let input = request.resolve().unwrap();

        assert_abs_diff_eq!(input.waypoints[0].coord.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(input.waypoints[0].coord.y, 0.0, epsilon = 1e-9);
        assert!((input.waypoints[1].coord.y - 1113.2).abs() < 1.0);

        let back = input.frame.to_output(input.waypoints[1].coord);
        assert_abs_diff_eq!(back.x, 24.96, epsilon = 1e-9);
        assert_abs_diff_eq!(back.y, 60.16, epsilon = 1e-9);
    }

    #[test]
    fn test_probe_request_skips_degenerate_areas() {
        let request = ProbeRequest::from_json(
            r#"{
                "point": [10.0, 5.0],
                "line": [[0.0, 5.0], [20.0, 5.0]],
                "areas": [
                    [[[0.0, 0.0], [0.0, 10.0], [20.0, 10.0], [20.0, 0.0], [0.0, 0.0]]],
                    [[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                    [],
                    [
                        [[0.0, 0.0], [0.0, 50.0], [50.0, 50.0], [50.0, 0.0]],
                        [[20.0, 20.0], [30.0, 20.0], [30.0, 30.0]]
                    ]
                ]
            }"#,
        )
        .unwrap();
        let input = request.resolve();

        assert_eq!(input.areas.len(), 2);
        assert_eq!(input.areas[1].interiors().len(), 1);
        assert_eq!(input.line.len(), 2);
        assert_eq!(input.point, geo::coord! { x: 10.0, y: 5.0 });
    }
}
