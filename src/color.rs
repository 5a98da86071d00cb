use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Golden-angle hue step; successive overlays stay far apart on the wheel.
const HUE_STEP: f32 = 137.5;

/// Hue of the first overlay, away from the blue primary trace.
const FIRST_HUE: f32 = 30.0;

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb<u8> = IntoColor::<Srgb>::into_color(hsl).into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Colours for analysis overlays (fit, peaks, processed series).
pub fn overlay_colors(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32(Hsl::new(FIRST_HUE + HUE_STEP * i as f32, 0.8, 0.5)))
        .collect()
}

/// Parse a `#rrggbb` trace colour. Anything else falls back to light blue.
pub fn parse_hex(color: &str) -> Color32 {
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color32::LIGHT_BLUE;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color32::from_rgb(r, g, b),
        _ => Color32::LIGHT_BLUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_parse() {
        assert_eq!(parse_hex("#2563eb"), Color32::from_rgb(0x25, 0x63, 0xeb));
        assert_eq!(parse_hex("nope"), Color32::LIGHT_BLUE);
        assert_eq!(parse_hex("#zzzzzz"), Color32::LIGHT_BLUE);
    }

    #[test]
    fn overlay_colours_are_distinct() {
        let colors = overlay_colors(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }
}
