use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::FieldValue;

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Category → colour
// ---------------------------------------------------------------------------

/// Fixed colour per category, shared by every chart and the side panel so a
/// category keeps its colour while filters change.
#[derive(Debug, Clone, Default)]
pub struct CategoryPalette {
    colors: BTreeMap<FieldValue, Color32>,
}

impl CategoryPalette {
    const FALLBACK: Color32 = Color32::LIGHT_BLUE;

    pub fn new(categories: &BTreeSet<FieldValue>) -> Self {
        let colors = categories
            .iter()
            .cloned()
            .zip(generate_palette(categories.len()))
            .collect();
        CategoryPalette { colors }
    }

    /// Colour for `category`; unknown categories (and datasets without a
    /// category column) get the fallback colour.
    pub fn color_for(&self, category: &FieldValue) -> Color32 {
        self.colors.get(category).copied().unwrap_or(Self::FALLBACK)
    }
}
