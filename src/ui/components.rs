//! Reusable UI components
//!
//! Standalone widgets shared by the landing, upload and results screens.

use crate::theme;
use eframe::egui;

/// Flat progress bar filled to `fraction` (0.0..=1.0)
pub fn progress_bar(ui: &mut egui::Ui, fraction: f32, fill: egui::Color32) -> egui::Response {
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(width, theme::PROGRESS_HEIGHT),
        egui::Sense::hover(),
    );
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let rounding = theme::PROGRESS_HEIGHT / 2.0;
        painter.rect_filled(rect, rounding, theme::BG_SURFACE);
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction > 0.0 {
            let mut filled = rect;
            filled.set_width(rect.width() * fraction);
            painter.rect_filled(filled, rounding, fill);
        }
    }
    response
}

/// Pill badge with translucent background
pub fn badge(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    let (bg, fg) = theme::badge_colors(color);
    egui::Frame::new()
        .fill(bg)
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, bg))
        .corner_radius(theme::RADIUS_LARGE)
        .inner_margin(egui::Margin::symmetric(10, 3))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(theme::FONT_SMALL).color(fg).strong());
        });
}

/// Label on the left, value on the right
pub fn info_row(ui: &mut egui::Ui, icon: &str, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("{}  {}", icon, label))
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(value)
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_PRIMARY)
                    .strong(),
            );
        });
    });
}

/// Labelled percentage bar used for confidence/affected-area metrics
pub fn metric_bar(ui: &mut egui::Ui, label: &str, value_text: &str, fraction: f32, color: egui::Color32) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).size(theme::FONT_LABEL).color(theme::TEXT_MUTED));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(value_text).size(theme::FONT_LABEL).color(color).strong());
        });
    });
    progress_bar(ui, fraction, color);
}

/// Icon + title + description card
pub fn feature_card(ui: &mut egui::Ui, icon: &str, title: &str, description: &str) {
    theme::card_frame().show(ui, |ui| {
        ui.set_min_height(120.0);
        ui.label(egui::RichText::new(icon).size(26.0).color(theme::ACCENT));
        ui.add_space(theme::SPACING_MD);
        ui.label(
            egui::RichText::new(title)
                .size(theme::FONT_TITLE)
                .color(theme::TEXT_PRIMARY)
                .strong(),
        );
        ui.label(egui::RichText::new(description).size(theme::FONT_BODY).color(theme::TEXT_MUTED));
    });
}

pub fn section_heading(ui: &mut egui::Ui, icon: &str, title: &str) {
    ui.label(
        egui::RichText::new(format!("{}  {}", icon, title))
            .size(theme::FONT_TITLE)
            .color(theme::TEXT_PRIMARY)
            .strong(),
    );
    ui.add_space(theme::SPACING_MD);
}

/// Center a fixed-width column inside the available space
pub fn centered_column<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    let width = ui.available_width().min(theme::CONTENT_MAX_WIDTH);
    let margin = ((ui.available_width() - width) / 2.0).max(0.0);
    ui.horizontal_top(|ui| {
        ui.add_space(margin);
        ui.vertical(|ui| {
            ui.set_width(width);
            add_contents(ui)
        })
        .inner
    })
    .inner
}
