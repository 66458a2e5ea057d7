pub mod primitives;
pub mod projection;
pub mod units;

pub use primitives::{Planar, Primitives, normalize_azimuth};
pub use projection::Projector;
pub use units::{METERS_PER_NAUTICAL_MILE, nautical_miles_to_meters};
