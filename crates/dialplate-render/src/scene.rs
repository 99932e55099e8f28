//! Top-down rendering of the plates on a braille canvas.

use dialplate_core::{PLATE_COUNT, PlateIndex, PlateSurface};
use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine},
};

use crate::color::{hex_to_color, lighten};
use crate::geometry::{canvas_bounds, radial_segment, tick_angles};
use crate::view::View;

/// Empty space kept around the outermost plate, in dial units.
const MARGIN: f64 = 1.0;

/// Length of a tick mark, in dial units.
const TICK_LENGTH: f64 = 0.35;

/// Lightness added to a plate color for its index marker.
const MARKER_LIGHTEN: f32 = 0.35;

/// Half-size of the reference grid, in dial units.
const GRID_EXTENT: f64 = 10.0;

/// Color of the reference grid.
const GRID_COLOR: Color = Color::Rgb(60, 60, 60);

/// Static appearance of one plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateStyle {
    pub radius: f64,
    /// Color as `0xRRGGBB`.
    pub color: u32,
    /// Number of tick marks (the digit cardinality, 0 for decorative plates).
    pub ticks: u32,
}

/// A plate proxy: appearance plus the angle it was last turned to.
#[derive(Debug, Clone, Copy)]
struct Plate {
    radius: f64,
    color: Color,
    marker_color: Color,
    ticks: u32,
    degrees: f64,
}

impl From<PlateStyle> for Plate {
    fn from(style: PlateStyle) -> Self {
        let color = hex_to_color(style.color);
        Self {
            radius: style.radius,
            color,
            marker_color: lighten(color, MARKER_LIGHTEN),
            ticks: style.ticks,
            degrees: 0.0,
        }
    }
}

/// The terminal drawing surface for the dial.
#[derive(Debug, Clone)]
pub struct PlateScene {
    plates: [Plate; PLATE_COUNT],
    view: View,
    show_grid: bool,
}

impl PlateScene {
    /// Create a scene from per-plate styles, outermost first.
    pub fn new(styles: [PlateStyle; PLATE_COUNT]) -> Self {
        Self {
            plates: styles.map(Plate::from),
            view: View::default(),
            show_grid: false,
        }
    }

    /// Current angle of a plate in degrees.
    pub fn rotation(&self, plate: PlateIndex) -> f64 {
        self.plates[plate.get()].degrees
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Restore the initial zoom and pan.
    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    /// Radius of the largest plate.
    fn outer_radius(&self) -> f64 {
        self.plates.iter().map(|p| p.radius).fold(0.0, f64::max)
    }

    /// Radius of the largest plate smaller than `plate`, or 0 at the center.
    fn inner_radius(&self, plate: &Plate) -> f64 {
        self.plates
            .iter()
            .map(|p| p.radius)
            .filter(|&r| r < plate.radius)
            .fold(0.0, f64::max)
    }

    fn draw_grid(&self, ctx: &mut Context) {
        let mut offset = -GRID_EXTENT;
        while offset <= GRID_EXTENT {
            ctx.draw(&CanvasLine::new(offset, -GRID_EXTENT, offset, GRID_EXTENT, GRID_COLOR));
            ctx.draw(&CanvasLine::new(-GRID_EXTENT, offset, GRID_EXTENT, offset, GRID_COLOR));
            offset += 2.0;
        }
    }

    fn draw_plate(&self, ctx: &mut Context, plate: &Plate) {
        ctx.draw(&Circle {
            x: 0.0,
            y: 0.0,
            radius: plate.radius,
            color: plate.color,
        });
        for angle in tick_angles(plate.ticks) {
            let ((x1, y1), (x2, y2)) =
                radial_segment(plate.radius - TICK_LENGTH, plate.radius, angle);
            ctx.draw(&CanvasLine::new(x1, y1, x2, y2, plate.color));
        }
    }

    fn draw_marker(&self, ctx: &mut Context, plate: &Plate) {
        let inner = self.inner_radius(plate);
        let ((x1, y1), (x2, y2)) = radial_segment(inner, plate.radius, plate.degrees);
        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, plate.marker_color));
    }
}

impl PlateSurface for PlateScene {
    fn apply_rotation(&mut self, plate: PlateIndex, degrees: f64) {
        self.plates[plate.get()].degrees = degrees;
    }

    fn render_frame(&mut self, frame: &mut Frame, area: Rect) {
        let extent = self.view.extent(self.outer_radius() + MARGIN);
        let (x_bounds, y_bounds) =
            canvas_bounds(area.width, area.height, extent, self.view.center());

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                if self.show_grid {
                    self.draw_grid(ctx);
                    ctx.layer();
                }
                for plate in &self.plates {
                    self.draw_plate(ctx, plate);
                }
                ctx.layer();
                for plate in &self.plates {
                    self.draw_marker(ctx, plate);
                }
            });

        frame.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn styles() -> [PlateStyle; PLATE_COUNT] {
        let ticks = [3, 10, 0, 6, 10, 0];
        std::array::from_fn(|i| PlateStyle {
            radius: 8.0 - i as f64,
            color: 0x4A4A4A + 0x101010 * i as u32,
            ticks: ticks[i],
        })
    }

    #[test]
    fn test_apply_rotation_updates_plate() {
        let mut scene = PlateScene::new(styles());
        let plate = PlateIndex::new(4).unwrap();
        scene.apply_rotation(plate, 144.0);
        assert_eq!(scene.rotation(plate), 144.0);
        assert_eq!(scene.rotation(PlateIndex::new(0).unwrap()), 0.0);
    }

    #[test]
    fn test_radii() {
        let scene = PlateScene::new(styles());
        assert_eq!(scene.outer_radius(), 8.0);
        assert_eq!(scene.inner_radius(&scene.plates[0]), 7.0);
        assert_eq!(scene.inner_radius(&scene.plates[5]), 0.0);
    }

    #[test]
    fn test_marker_color_is_lighter() {
        let scene = PlateScene::new(styles());
        let plate = &scene.plates[0];
        assert_ne!(plate.color, plate.marker_color);
    }

    #[test]
    fn test_reset_view_and_grid_toggle() {
        let mut scene = PlateScene::new(styles());
        scene.view_mut().zoom_in();
        scene.reset_view();
        assert_eq!(*scene.view(), View::default());

        assert!(!scene.show_grid());
        scene.toggle_grid();
        assert!(scene.show_grid());
    }

    #[test]
    fn test_render_frame_draws_braille() {
        let backend = TestBackend::new(40, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut scene = PlateScene::new(styles());
        scene.apply_rotation(PlateIndex::new(0).unwrap(), 120.0);
        terminal
            .draw(|frame| {
                let area = frame.area();
                scene.render_frame(frame, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let drawn = buffer
            .content
            .iter()
            .filter(|cell| cell.symbol() != " ")
            .count();
        assert!(drawn > 0);
    }
}
