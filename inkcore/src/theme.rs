//! inkpad theme — dark panel styling.
//!
//! Charcoal surfaces, a near-black editor well, light grey text, 1px
//! borders. Fonts are egui's defaults; no font assets ship with the crate.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// The panel palette.
pub struct InkColors;

impl InkColors {
    /// General widget background.
    pub const SURFACE: Color32 = Color32::from_rgb(0x2c, 0x2c, 0x2c);
    /// Editor and sidebar wells.
    pub const WELL: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x1e);
    /// Buttons and menus.
    pub const RAISED: Color32 = Color32::from_rgb(0x3c, 0x3c, 0x3c);
    /// Hovered buttons and menu items.
    pub const HOVER: Color32 = Color32::from_rgb(0x4c, 0x4c, 0x4c);
    /// Borders.
    pub const BORDER: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
    /// Body text.
    pub const TEXT: Color32 = Color32::from_rgb(0xdd, 0xdd, 0xdd);
    /// Editor text, slightly brighter.
    pub const TEXT_BRIGHT: Color32 = Color32::from_rgb(0xe6, 0xe6, 0xe6);
    /// Status bar text.
    pub const TEXT_DIM: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);
}

/// Theme configuration for inkpad windows.
pub struct InkTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for InkTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 20.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 4.0,
        }
    }
}

impl InkTheme {
    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::dark();

        visuals.window_fill = InkColors::SURFACE;
        visuals.panel_fill = InkColors::SURFACE;
        visuals.faint_bg_color = InkColors::RAISED;
        visuals.extreme_bg_color = InkColors::WELL;

        visuals.window_rounding = Rounding::same(4.0);
        visuals.menu_rounding = Rounding::same(4.0);
        visuals.window_stroke = Stroke::new(1.0, InkColors::BORDER);

        visuals.override_text_color = Some(InkColors::TEXT);

        let paint = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::new(1.0, InkColors::BORDER);
            ws.fg_stroke = Stroke::new(1.0, InkColors::TEXT);
            ws.rounding = Rounding::same(4.0);
        };
        paint(&mut visuals.widgets.noninteractive, InkColors::SURFACE);
        paint(&mut visuals.widgets.inactive, InkColors::RAISED);
        paint(&mut visuals.widgets.hovered, InkColors::HOVER);
        paint(&mut visuals.widgets.active, InkColors::HOVER);
        paint(&mut visuals.widgets.open, InkColors::HOVER);

        visuals.selection.bg_fill = InkColors::BORDER;
        visuals.selection.stroke = Stroke::new(1.0, InkColors::TEXT_BRIGHT);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(10.0, 5.0);

        ctx.set_style(style);
    }

    /// Editor well frame: near-black fill, 1px border.
    pub fn well_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(InkColors::WELL)
            .stroke(Stroke::new(1.0, InkColors::BORDER))
            .rounding(Rounding::same(4.0))
            .inner_margin(egui::Margin::same(6.0))
    }

    /// Title bar: surface fill, 1px bottom border.
    pub fn title_bar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(InkColors::SURFACE)
            .stroke(Stroke::new(1.0, InkColors::BORDER))
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
    }
}

/// Menu/toolbar row styling helper.
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    let frame_resp = egui::Frame::none()
        .fill(InkColors::SURFACE)
        .stroke(Stroke::new(1.0, InkColors::BORDER))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner);
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}
