//! Boundary between the clock state and whatever draws the plates.

use ratatui::{Frame, layout::Rect};

use crate::plate::PlateIndex;

/// A drawing surface holding one rotatable proxy per plate.
pub trait PlateSurface {
    /// Turn `plate` to `degrees`, measured clockwise from twelve o'clock.
    fn apply_rotation(&mut self, plate: PlateIndex, degrees: f64);

    /// Draw the current plate orientations into `area` of `frame`.
    fn render_frame(&mut self, frame: &mut Frame, area: Rect);
}
