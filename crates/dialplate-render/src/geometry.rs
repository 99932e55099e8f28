//! Dial geometry in canvas coordinates (y up, angles clockwise from twelve).

/// Point at `radius` from the center, `degrees` clockwise from twelve o'clock.
pub fn point_on_dial(radius: f64, degrees: f64) -> (f64, f64) {
    let theta = degrees.to_radians();
    (radius * theta.sin(), radius * theta.cos())
}

/// Segment from `inner` to `outer` radius along `degrees`.
pub fn radial_segment(inner: f64, outer: f64, degrees: f64) -> ((f64, f64), (f64, f64)) {
    (point_on_dial(inner, degrees), point_on_dial(outer, degrees))
}

/// Angles of `count` evenly spaced ticks starting at twelve o'clock.
pub fn tick_angles(count: u32) -> impl Iterator<Item = f64> {
    let step = if count == 0 { 0.0 } else { 360.0 / f64::from(count) };
    (0..count).map(move |i| f64::from(i) * step)
}

/// Canvas bounds showing at least `extent` units around `center`.
///
/// Terminal cells are about twice as tall as they are wide, so the wider
/// axis is stretched to keep circles round.
pub fn canvas_bounds(
    width: u16,
    height: u16,
    extent: f64,
    center: (f64, f64),
) -> ([f64; 2], [f64; 2]) {
    let width = f64::from(width.max(1));
    let height = f64::from(height.max(1));

    // Horizontal units per vertical unit for square pixels
    let aspect = width / (2.0 * height);
    let (half_x, half_y) = if aspect >= 1.0 {
        (extent * aspect, extent)
    } else {
        (extent, extent / aspect)
    };

    (
        [center.0 - half_x, center.0 + half_x],
        [center.1 - half_y, center.1 + half_y],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_point_on_dial_is_clockwise_from_twelve() {
        assert!(close(point_on_dial(2.0, 0.0), (0.0, 2.0)));
        assert!(close(point_on_dial(2.0, 90.0), (2.0, 0.0)));
        assert!(close(point_on_dial(2.0, 180.0), (0.0, -2.0)));
        assert!(close(point_on_dial(2.0, 270.0), (-2.0, 0.0)));
    }

    #[test]
    fn test_radial_segment() {
        let (a, b) = radial_segment(3.0, 4.0, 90.0);
        assert!(close(a, (3.0, 0.0)));
        assert!(close(b, (4.0, 0.0)));
    }

    #[test]
    fn test_tick_angles() {
        let ticks: Vec<f64> = tick_angles(3).collect();
        assert_eq!(ticks, vec![0.0, 120.0, 240.0]);
        assert_eq!(tick_angles(0).count(), 0);
    }

    #[test]
    fn test_canvas_bounds_wide_terminal() {
        // 80x20 cells: aspect 2.0, horizontal range doubles
        let (x, y) = canvas_bounds(80, 20, 10.0, (0.0, 0.0));
        assert_eq!(x, [-20.0, 20.0]);
        assert_eq!(y, [-10.0, 10.0]);
    }

    #[test]
    fn test_canvas_bounds_tall_terminal() {
        // 20x40 cells: aspect 0.25, vertical range grows instead
        let (x, y) = canvas_bounds(20, 40, 10.0, (1.0, -1.0));
        assert_eq!(x, [-9.0, 11.0]);
        assert_eq!(y, [-41.0, 39.0]);
    }
}
