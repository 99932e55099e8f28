//! Zoom and pan of the dial view.

/// Smallest zoom factor.
const MIN_ZOOM: f64 = 0.25;

/// Largest zoom factor.
const MAX_ZOOM: f64 = 4.0;

/// Multiplier applied per zoom step.
const ZOOM_STEP: f64 = 1.25;

/// Direction of a pan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pan {
    Up,
    Down,
    Left,
    Right,
}

/// How the dial is framed on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    zoom: f64,
    center: (f64, f64),
}

impl Default for View {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            center: (0.0, 0.0),
        }
    }
}

impl View {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Move the view one unit, scaled so a step looks the same at any zoom.
    pub fn pan(&mut self, direction: Pan) {
        let step = 1.0 / self.zoom;
        match direction {
            Pan::Up => self.center.1 += step,
            Pan::Down => self.center.1 -= step,
            Pan::Left => self.center.0 -= step,
            Pan::Right => self.center.0 += step,
        }
    }

    /// Return to the initial framing.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Half-size of the visible region needed to show `radius`.
    pub fn extent(&self, radius: f64) -> f64 {
        radius / self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = View::default();
        for _ in 0..20 {
            view.zoom_in();
        }
        assert_eq!(view.zoom(), MAX_ZOOM);
        for _ in 0..40 {
            view.zoom_out();
        }
        assert_eq!(view.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_pan_and_reset() {
        let mut view = View::default();
        view.pan(Pan::Right);
        view.pan(Pan::Up);
        view.pan(Pan::Up);
        assert_eq!(view.center(), (1.0, 2.0));
        view.zoom_in();
        view.reset();
        assert_eq!(view, View::default());
    }

    #[test]
    fn test_extent_shrinks_with_zoom() {
        let mut view = View::default();
        assert_eq!(view.extent(9.0), 9.0);
        view.zoom_in();
        assert!(view.extent(9.0) < 9.0);
    }
}
