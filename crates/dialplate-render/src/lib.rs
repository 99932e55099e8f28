//! Terminal rendering for the dialplate clock.
//!
//! The dial is drawn from above: every plate is a circle with tick marks
//! for each digit position and an index marker showing its rotation.
//! [`PlateScene`] is the [`dialplate_core::PlateSurface`] the host loop
//! applies rotations to.

mod color;
mod geometry;
mod scene;
mod view;

pub use color::{hex_to_color, hsl_to_rgb, lighten};
pub use geometry::{canvas_bounds, point_on_dial};
pub use scene::{PlateScene, PlateStyle};
pub use view::{Pan, View};
