use geo::{Coord, Line};

use crate::config::RouteConfig;
use crate::domain::Waypoint;
use crate::geometry::Primitives;

/// Which way the route bends at a waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Classify the turn from inbound azimuth `a1` to outbound azimuth `a2`
    ///
    /// Sign test on the shorter angular difference: turning toward increasing
    /// azimuth by less than half a circle is a right turn.
    pub fn classify(a1: f64, a2: f64) -> Self {
        if (a2 > a1 && a2 - a1 < 180.0) || (a1 > a2 && a1 - a2 > 180.0) {
            TurnDirection::Right
        } else {
            TurnDirection::Left
        }
    }

    /// Azimuth offset from a leg toward the inside of the turn
    fn inward_offset(self) -> f64 {
        match self {
            TurnDirection::Right => 90.0,
            TurnDirection::Left => -90.0,
        }
    }
}

/// Circle arc replacing one sharp corner
#[derive(Debug, Clone, Copy)]
pub(crate) struct TurningArc {
    pub center: Coord<f64>,
    pub radius: f64,
    /// Azimuth from the center to the tangent point on the inbound leg
    pub start_azimuth: f64,
    /// Azimuth from the center to the tangent point on the outbound leg
    pub end_azimuth: f64,
    pub direction: TurnDirection,
}

impl TurningArc {
    /// Sample the arc in travel order, inbound tangent point first
    pub fn sample<P: Primitives>(&self, primitives: &P, steps: usize) -> Vec<Coord<f64>> {
        match self.direction {
            TurnDirection::Right => primitives.sample_arc(
                self.center,
                self.radius,
                self.start_azimuth,
                self.end_azimuth,
                steps,
            ),
            TurnDirection::Left => {
                // Sampling only walks in increasing azimuth
                let mut coords = primitives.sample_arc(
                    self.center,
                    self.radius,
                    self.end_azimuth,
                    self.start_azimuth,
                    steps,
                );
                coords.reverse();
                coords
            }
        }
    }
}

/// Fit a turning circle of `radius` tangent to both legs at `middle`
///
/// Returns `None` whenever the corner should stay a sharp vertex: zero
/// radius, a negligible turn, offset legs that do not cross in exactly one
/// point, or a tangent point that cannot be projected.
pub(crate) fn turning_arc<P: Primitives>(
    primitives: &P,
    start: Coord<f64>,
    middle: Coord<f64>,
    end: Coord<f64>,
    radius: f64,
    config: &RouteConfig,
) -> Option<TurningArc> {
    if radius <= 0.0 {
        return None;
    }

    let a1 = primitives.azimuth(start, middle);
    let a2 = primitives.azimuth(middle, end);

    let turn = (a1 - a2).abs();
    if turn < config.min_turn_degrees || turn > 360.0 - config.min_turn_degrees {
        log::debug!(
            "Turn at ({:.3}, {:.3}) is {:.3} deg, keeping sharp vertex",
            middle.x,
            middle.y,
            turn
        );
        return None;
    }

    let direction = TurnDirection::classify(a1, a2);
    let offset_in = a1 + direction.inward_offset();
    let offset_out = a2 + direction.inward_offset();

    let leg_in = Line::new(
        primitives.destination(start, radius, offset_in),
        primitives.destination(middle, radius, offset_in),
    );
    let leg_out = Line::new(
        primitives.destination(middle, radius, offset_out),
        primitives.destination(end, radius, offset_out),
    );

    let Some(center) = primitives.segment_intersection(leg_in, leg_out) else {
        log::debug!(
            "Offset legs at ({:.3}, {:.3}) do not meet in one point for radius {}",
            middle.x,
            middle.y,
            radius
        );
        return None;
    };

    let tangent_in = primitives.nearest_on_segment(Line::new(start, middle), center)?;
    let tangent_out = primitives.nearest_on_segment(Line::new(middle, end), center)?;

    Some(TurningArc {
        center,
        radius,
        start_azimuth: primitives.azimuth(center, tangent_in),
        end_azimuth: primitives.azimuth(center, tangent_out),
        direction,
    })
}

/// Coordinates that replace the interior waypoint `corner`
///
/// Either the sampled turning arc or, when no arc can be fitted, the bare
/// waypoint coordinate. Never empty.
pub fn corner_coords<P: Primitives>(
    primitives: &P,
    previous: Coord<f64>,
    corner: &Waypoint,
    next: Coord<f64>,
    config: &RouteConfig,
) -> Vec<Coord<f64>> {
    match turning_arc(
        primitives,
        previous,
        corner.coord,
        next,
        corner.effective_radius(),
        config,
    ) {
        Some(arc) => {
            let coords = arc.sample(primitives, config.arc_step_count());
            log::trace!(
                "{:?} arc r={} around ({:.3}, {:.3}): {} samples",
                arc.direction,
                arc.radius,
                arc.center.x,
                arc.center.y,
                coords.len()
            );
            coords
        }
        None => vec![corner.coord],
    }
}
