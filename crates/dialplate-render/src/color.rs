//! Color helpers for plate shading.

use ratatui::style::Color;

/// Convert a `0xRRGGBB` value to a terminal color.
pub fn hex_to_color(hex: u32) -> Color {
    let [_, r, g, b] = hex.to_be_bytes();
    Color::Rgb(r, g, b)
}

/// Raise the lightness of an RGB color by `amount` (0.0-1.0).
///
/// Non-RGB colors are returned unchanged.
pub fn lighten(color: Color, amount: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let (h, s, l) = rgb_to_hsl(r, g, b);
            hsl_to_rgb(h, s, (l + amount).clamp(0.0, 1.0))
        }
        other => other,
    }
}

/// Convert RGB to HSL (hue in degrees, saturation and lightness 0.0-1.0).
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s, l)
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Color::Rgb(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color(0x4A5A6A), Color::Rgb(0x4A, 0x5A, 0x6A));
        // Bits above 24 are ignored
        assert_eq!(hex_to_color(0xFF000000), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_lighten_gray() {
        let base = hex_to_color(0x4A4A4A);
        let Color::Rgb(r, g, b) = lighten(base, 0.3) else {
            panic!("expected rgb");
        };
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!(r > 0x4A);
        assert_eq!(lighten(Color::Rgb(250, 250, 250), 1.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_hsl_roundtrip_primary() {
        let (h, s, l) = rgb_to_hsl(255, 0, 0);
        assert_eq!((h, s, l), (0.0, 1.0, 0.5));
        assert_eq!(hsl_to_rgb(h, s, l), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_lighten_leaves_named_colors() {
        assert_eq!(lighten(Color::Cyan, 0.5), Color::Cyan);
    }
}
