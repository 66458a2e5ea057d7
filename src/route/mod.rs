//! Turning-arc route synthesis
//!
//! Replaces every interior corner of a waypoint route with a circular arc
//! tangent to both adjoining legs, sized by that waypoint's turning radius.

pub mod arc;
pub mod builder;

pub use arc::{TurnDirection, corner_coords};
pub use builder::{build_route, build_route_with, route_length};
