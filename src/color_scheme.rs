//! Color definitions for LassoPlot
//!
//! Class labels are coloured with the ten-colour categorical palette, selected
//! points are highlighted in red, and the lasso trace uses a translucent blue.
//! [`ColorScheme`] only controls the chrome (background, axes, egui visuals).

use eframe::egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

/// Categorical palette used for class labels (`label mod 10`).
pub const CATEGORY10: [Color32; 10] = [
    Color32::from_rgb(0x1f, 0x77, 0xb4),
    Color32::from_rgb(0xff, 0x7f, 0x0e),
    Color32::from_rgb(0x2c, 0xa0, 0x2c),
    Color32::from_rgb(0xd6, 0x27, 0x28),
    Color32::from_rgb(0x94, 0x67, 0xbd),
    Color32::from_rgb(0x8c, 0x56, 0x4b),
    Color32::from_rgb(0xe3, 0x77, 0xc2),
    Color32::from_rgb(0x7f, 0x7f, 0x7f),
    Color32::from_rgb(0xbc, 0xbd, 0x22),
    Color32::from_rgb(0x17, 0xbe, 0xcf),
];

/// Fill colour of points inside the latest lasso.
pub const SELECTED: Color32 = Color32::RED;

/// Stroke of the lasso trace.
pub const LASSO_STROKE: Color32 = Color32::from_rgb(0, 0, 255);

/// Stroke width of the lasso trace.
pub const LASSO_STROKE_WIDTH: f32 = 2.0;

/// Fill of the lasso trace: light blue at 40 % opacity.
pub fn lasso_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(173, 216, 230, 102)
}

/// Palette colour for a class label; negative labels wrap around as well.
pub fn label_color(label: i64) -> Color32 {
    CATEGORY10[label.rem_euclid(CATEGORY10.len() as i64) as usize]
}

/// Visual theme for the plot chrome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScheme {
    /// White background, black axes.
    #[default]
    Light,
    /// Dark background, light axes.
    Dark,
}

impl ColorScheme {
    /// All built-in schemes (useful for combo-box UIs).
    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::Light, ColorScheme::Dark]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
        }
    }

    /// Background of the plot regions.
    pub fn background(&self) -> Color32 {
        match self {
            ColorScheme::Light => Color32::WHITE,
            ColorScheme::Dark => Color32::from_rgb(27, 27, 27),
        }
    }

    /// Colour of axis domain lines, ticks and tick labels.
    pub fn axis_color(&self) -> Color32 {
        match self {
            ColorScheme::Light => Color32::BLACK,
            ColorScheme::Dark => Color32::from_rgb(210, 210, 210),
        }
    }

    /// Apply this scheme's visuals to an egui context.
    pub fn apply(&self, ctx: &Context) {
        match self {
            ColorScheme::Light => ctx.set_visuals(Visuals::light()),
            ColorScheme::Dark => ctx.set_visuals(Visuals::dark()),
        }
    }
}
