//! fairway-geom - Turning-arc routes and fairway width probes for chart vector features

pub mod config;
pub mod domain;
pub mod features;
pub mod geometry;
pub mod probe;
pub mod route;

pub use config::{ProbeConfig, RouteConfig};
pub use domain::{CrossSection, Waypoint};
pub use geometry::{Planar, Primitives};
pub use probe::{probe_width, probe_width_with};
pub use route::{build_route, build_route_with};
