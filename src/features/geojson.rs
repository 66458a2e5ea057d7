use geo::Coord;
use serde_json::{Value, json};

use super::request::Frame;
use crate::domain::CrossSection;
use crate::route::route_length;

/// Route polyline as a GeoJSON `LineString` feature
///
/// `coords` are local; the length property is measured before mapping back.
pub fn route_feature(coords: &[Coord<f64>], frame: &Frame) -> Value {
    line_feature(
        coords,
        frame,
        json!({
            "kind": "route",
            "length_m": route_length(coords),
        }),
    )
}

/// Cross-section as a two-point GeoJSON `LineString` feature
pub fn cross_section_feature(section: &CrossSection, frame: &Frame) -> Value {
    line_feature(
        &section.to_line_string().0,
        frame,
        json!({
            "kind": "cross_section",
            "width_m": section.width,
        }),
    )
}

pub fn feature_collection(features: Vec<Value>) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn line_feature(coords: &[Coord<f64>], frame: &Frame, properties: Value) -> Value {
    let positions: Vec<[f64; 2]> = coords
        .iter()
        .map(|&c| {
            let out = frame.to_output(c);
            [out.x, out.y]
        })
        .collect();

    json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": positions,
        },
        "properties": properties,
    })
}
