//! Request decoding and GeoJSON feature output around the geometry core

pub mod error;
pub mod geojson;
pub mod request;

pub use error::RequestError;
pub use geojson::{cross_section_feature, feature_collection, route_feature};
pub use request::{Crs, Frame, ProbeInput, ProbeRequest, RadiusUnit, RouteInput, RouteRequest};
