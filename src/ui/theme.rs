//! Color theme and styling for the compose window.
//!
//! A trimmed version of the chat client's surface/semantic palette: three
//! surface levels, text emphasis, and the spell-check underline color.

use eframe::egui::{Color32, FontFamily, FontId, TextStyle};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct SlircTheme {
    pub name: String,
    /// App background, panel background, input background
    pub surface: [Color32; 3],
    pub error: Color32,
    /// Underline for misspelled words
    pub misspelled: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub border_medium: Color32,
}

impl SlircTheme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            surface: [
                Color32::from_rgb(10, 10, 15),
                Color32::from_rgb(19, 19, 26),
                Color32::from_rgb(45, 45, 52),
            ],
            error: Color32::from_rgb(240, 71, 71),
            misspelled: Color32::from_rgb(240, 71, 71),
            text_primary: Color32::WHITE,
            text_muted: Color32::from_rgb(114, 118, 125),
            border_medium: Color32::from_rgb(47, 49, 54),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            surface: [
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(246, 246, 247),
                Color32::WHITE,
            ],
            error: Color32::from_rgb(240, 71, 71),
            misspelled: Color32::from_rgb(210, 30, 30),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_muted: Color32::from_rgb(116, 127, 141),
            border_medium: Color32::from_rgb(210, 213, 219),
        }
    }

    /// "light" selects the light theme, anything else is dark
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

fn configure_text_styles() -> BTreeMap<TextStyle, FontId> {
    [
        (TextStyle::Small, FontId::new(10.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
    ]
    .into()
}

pub fn apply_app_style(ctx: &eframe::egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.text_styles = configure_text_styles();
    style.spacing.item_spacing = eframe::egui::vec2(8.0, 6.0);
    style.spacing.button_padding = eframe::egui::vec2(10.0, 5.0);

    style.visuals.widgets.inactive.corner_radius = eframe::egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = eframe::egui::CornerRadius::same(6);
    style.visuals.widgets.active.bg_fill = Color32::from_rgb(88, 101, 242);
    style.visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(88, 101, 242, 100);

    ctx.set_style(style);
}
