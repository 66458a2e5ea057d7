/// Meters per international nautical mile
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Chart data commonly states turn radii in nautical miles
pub fn nautical_miles_to_meters(nm: f64) -> f64 {
    nm * METERS_PER_NAUTICAL_MILE
}
