//! Color utilities for the coordinated views

use egui::Color32;

/// Diverging color map (blue-white-red) over t in [0, 1]; 0.5 is neutral.
pub fn diverging_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);

    if t < 0.5 {
        let s = t * 2.0;
        Color32::from_rgb(
            (50.0 + 205.0 * s) as u8,
            (50.0 + 205.0 * s) as u8,
            (200.0 + 55.0 * s) as u8,
        )
    } else {
        let s = (t - 0.5) * 2.0;
        Color32::from_rgb(
            255,
            (255.0 - 205.0 * s) as u8,
            (255.0 - 205.0 * s) as u8,
        )
    }
}

/// Map a correlation value onto the diverging scale with a symmetric
/// domain of +-max_abs. The domain is per displayed matrix, so identical
/// values can render as different colors across different selections.
pub fn correlation_color(value: f64, max_abs: f64) -> Color32 {
    let t = if max_abs <= 0.0 {
        0.5
    } else {
        ((value + max_abs) / (2.0 * max_abs)) as f32
    };
    diverging_color(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_neutral() {
        assert_eq!(correlation_color(0.0, 1.0), diverging_color(0.5));
        assert_eq!(diverging_color(0.5), Color32::from_rgb(255, 255, 255));
    }

    #[test]
    fn extremes_map_to_scale_endpoints() {
        assert_eq!(correlation_color(1.0, 1.0), diverging_color(1.0));
        assert_eq!(correlation_color(-1.0, 1.0), diverging_color(0.0));
        // Same value, different domain, different color.
        assert_ne!(correlation_color(0.5, 0.5), correlation_color(0.5, 1.0));
    }

    #[test]
    fn zero_domain_falls_back_to_neutral() {
        assert_eq!(correlation_color(0.0, 0.0), diverging_color(0.5));
    }
}
