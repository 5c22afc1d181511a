use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Curve colours
// ---------------------------------------------------------------------------

/// Distinct plot colour per curve, by evenly spaced hues.
#[derive(Debug, Clone, Default)]
pub struct CurvePalette {
    entries: Vec<(String, Color32)>,
}

impl CurvePalette {
    pub fn new<'a>(names: impl Iterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = names.collect();
        let n = names.len().max(1) as f32;
        let entries = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let hue = (i as f32 / n) * 360.0;
                (name.to_string(), hsl_to_color32(hue, 0.75, 0.55))
            })
            .collect();
        CurvePalette { entries }
    }

    pub fn color_for(&self, curve: &str) -> Color32 {
        self.entries
            .iter()
            .find(|(name, _)| name == curve)
            .map(|(_, c)| *c)
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}

// ---------------------------------------------------------------------------
// Result cell tint
// ---------------------------------------------------------------------------

/// Red (0) to green (1) tint for an efficiency value; grey for sentinel rows.
pub fn efficiency_color(value: f64) -> Color32 {
    if value < 0.0 {
        return Color32::GRAY;
    }
    let t = value.clamp(0.0, 1.0) as f32;
    hsl_to_color32(t * 120.0, 0.65, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_assigns_distinct_colours() {
        let p = CurvePalette::new(["a", "b", "c"].into_iter());
        assert_ne!(p.color_for("a"), p.color_for("b"));
        assert_ne!(p.color_for("b"), p.color_for("c"));
        assert_eq!(p.color_for("missing"), Color32::LIGHT_BLUE);
    }

    #[test]
    fn sentinel_is_grey() {
        assert_eq!(efficiency_color(-1.0), Color32::GRAY);
        assert_ne!(efficiency_color(0.0), efficiency_color(1.0));
    }
}
