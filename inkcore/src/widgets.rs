//! Shared widgets for the editor panel.

use crate::theme::InkColors;
use egui::{Response, Ui, Widget};

/// Toolbar/sidebar push button with hover feedback. Checkable variants
/// (like the sidebar toggle) render filled while selected.
pub struct ToolButton<'a> {
    text: &'a str,
    selected: bool,
}

impl<'a> ToolButton<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for ToolButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let galley = ui.painter().layout_no_wrap(
            self.text.to_string(),
            egui::FontId::proportional(14.0),
            InkColors::TEXT,
        );
        let padding = egui::vec2(12.0, 4.0);
        let desired_size = egui::vec2(
            galley.size().x + padding.x * 2.0,
            ui.spacing().interact_size.y,
        );
        let (rect, response) = ui.allocate_exact_size(desired_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let pressed = response.is_pointer_button_down_on() || self.selected;
            let fill = if pressed {
                InkColors::HOVER
            } else if response.hovered() {
                InkColors::HOVER
            } else {
                InkColors::RAISED
            };
            let border = if self.selected {
                InkColors::TEXT_DIM
            } else {
                InkColors::BORDER
            };
            painter.rect_filled(rect, 4.0, fill);
            painter.rect_stroke(rect, 4.0, egui::Stroke::new(1.0, border));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.text,
                egui::FontId::proportional(14.0),
                InkColors::TEXT,
            );
        }

        response
    }
}

/// Status bar: dim counter text on the panel surface.
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(InkColors::SURFACE)
        .inner_margin(egui::Margin::symmetric(8.0, 3.0))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(text)
                    .color(InkColors::TEXT_DIM)
                    .size(11.0),
            );
        });
}

/// One row of the sidebar and open/save listings.
pub struct FileListItem<'a> {
    name: &'a str,
    is_dir: bool,
    selected: bool,
}

impl<'a> FileListItem<'a> {
    pub fn new(name: &'a str, is_dir: bool) -> Self {
        Self { name, is_dir, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for FileListItem<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();

            if self.selected {
                painter.rect_filled(rect, 2.0, InkColors::BORDER);
            } else if response.hovered() {
                painter.rect_filled(rect, 2.0, InkColors::RAISED);
            }

            let icon = if self.is_dir { "📁" } else { "📄" };
            painter.text(
                egui::pos2(rect.min.x + 12.0, rect.center().y),
                egui::Align2::CENTER_CENTER,
                icon,
                egui::FontId::proportional(12.0),
                InkColors::TEXT,
            );
            painter.text(
                egui::pos2(rect.min.x + 24.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.name,
                egui::FontId::proportional(12.0),
                if self.selected {
                    InkColors::TEXT_BRIGHT
                } else {
                    InkColors::TEXT
                },
            );
        }

        response
    }
}
