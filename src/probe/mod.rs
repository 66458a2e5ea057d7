//! Fairway width cross-section probe
//!
//! Measures how wide the navigable area is where a user inspects a
//! navigation line, oriented by the line's local direction of travel.

pub mod snap;
pub mod width;

pub use snap::{Snap, snap_to_line};
pub use width::{probe_width, probe_width_with};
