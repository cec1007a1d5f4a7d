use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use hiring_dashboard::data::HiringType;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Hiring type colours
// ---------------------------------------------------------------------------

/// Corporate blues, darkest first.
const TYPE_PALETTE: [Color32; 3] = [
    Color32::from_rgb(0x1e, 0x3a, 0x8a),
    Color32::from_rgb(0x3b, 0x82, 0xf6),
    Color32::from_rgb(0x60, 0xa5, 0xfa),
];

/// Fixed colour for a hiring type, so every chart agrees.
pub fn type_color(t: HiringType) -> Color32 {
    match t {
        HiringType::NewPosition => TYPE_PALETTE[0],
        HiringType::Promotion => TYPE_PALETTE[1],
        HiringType::Replacement => TYPE_PALETTE[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn types_have_distinct_colours() {
        let c: Vec<_> = HiringType::ALL.iter().map(|t| type_color(*t)).collect();
        assert_ne!(c[0], c[1]);
        assert_ne!(c[1], c[2]);
        assert_ne!(c[0], c[2]);
    }
}
