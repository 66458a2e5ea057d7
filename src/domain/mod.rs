pub mod cross_section;
pub mod waypoint;

pub use cross_section::CrossSection;
pub use waypoint::Waypoint;
