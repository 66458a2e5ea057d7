use geo::Coord;

/// A route vertex with the turning radius the vessel needs there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub coord: Coord<f64>,
    /// Radius in meters; 0 keeps the corner sharp
    pub turn_radius: f64,
}

impl Waypoint {
    pub fn new(coord: Coord<f64>, turn_radius: f64) -> Self {
        Self { coord, turn_radius }
    }

    /// Waypoint without a turning arc
    pub fn sharp(coord: Coord<f64>) -> Self {
        Self::new(coord, 0.0)
    }

    /// Radius usable for arc construction
    ///
    /// Negative and non-finite radii collapse to 0.
    pub fn effective_radius(&self) -> f64 {
        if self.turn_radius.is_finite() && self.turn_radius > 0.0 {
            self.turn_radius
        } else {
            0.0
        }
    }
}
