//! Results screen: the static diagnosis dashboard and its export actions

use super::App;
use crate::diagnosis::{zoom_in, zoom_out, ConfidenceLevel, Diagnosis, ExportError, Severity};
use crate::theme;
use crate::types::*;
use crate::ui::components;
use crate::utils::fit_size;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::path::Path;
use tracing::{info, warn};

/// Mock lesion spots as (x, y, radius) in unit coordinates of the image
const LESIONS: [(f32, f32, f32); 5] = [
    (0.32, 0.38, 0.09),
    (0.55, 0.30, 0.06),
    (0.62, 0.58, 0.11),
    (0.40, 0.66, 0.05),
    (0.24, 0.55, 0.04),
];

#[derive(Debug, Clone, Copy)]
enum ExportKind {
    Json,
    Report,
}

pub(crate) fn confidence_color(level: ConfidenceLevel) -> egui::Color32 {
    match level {
        ConfidenceLevel::High => theme::STATUS_SUCCESS,
        ConfidenceLevel::Medium => theme::STATUS_WARNING,
        ConfidenceLevel::Low => theme::STATUS_ERROR,
    }
}

pub(crate) fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Low => theme::STATUS_SUCCESS,
        Severity::Moderate => theme::STATUS_WARNING,
        Severity::High => theme::STATUS_ERROR,
        Severity::Unknown => theme::TEXT_MUTED,
    }
}

impl App {
    fn current_diagnosis(&self) -> Diagnosis {
        Diagnosis::sample(self.upload.measured_resolution())
    }

    pub(crate) fn render_results(&mut self, ui: &mut egui::Ui) {
        let diagnosis = self.current_diagnosis();

        ui.add_space(theme::SPACING_SECTION);
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new("Diagnostic Results")
                        .size(theme::FONT_DISPLAY)
                        .color(theme::TEXT_PRIMARY)
                        .strong(),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "Comprehensive analysis completed on {}",
                        diagnosis.metadata.date
                    ))
                    .color(theme::TEXT_MUTED),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add(theme::button_accent(format!("{}  Export Data", icons::DOWNLOAD_SIMPLE)))
                    .clicked()
                {
                    self.export(&diagnosis, ExportKind::Json);
                }
                if ui
                    .add(theme::button(format!("{}  Generate Report", icons::FILE_TEXT)))
                    .clicked()
                {
                    self.export(&diagnosis, ExportKind::Report);
                }
            });
        });
        ui.add_space(theme::SPACING_XL);

        ui.columns(2, |cols| {
            self.render_visual_analysis(&mut cols[0], &diagnosis);
            cols[0].add_space(theme::SPACING_LG);
            render_treatment(&mut cols[0], &diagnosis);

            self.render_diagnosis_summary(&mut cols[1], &diagnosis);
        });
        ui.add_space(theme::SPACING_SECTION);
    }

    fn render_visual_analysis(&mut self, ui: &mut egui::Ui, diagnosis: &Diagnosis) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("{}  Visual Analysis", icons::MICROSCOPE))
                        .size(theme::FONT_TITLE)
                        .color(theme::TEXT_PRIMARY)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(theme::button(icons::MAGNIFYING_GLASS_PLUS)).clicked() {
                        self.zoom = zoom_in(self.zoom);
                    }
                    ui.label(egui::RichText::new(format!("{}%", self.zoom)).color(theme::TEXT_MUTED));
                    if ui.add(theme::button(icons::MAGNIFYING_GLASS_MINUS)).clicked() {
                        self.zoom = zoom_out(self.zoom);
                    }
                    let eye = if self.show_overlay { icons::EYE } else { icons::EYE_SLASH };
                    if ui.add(theme::button(eye)).on_hover_text("Toggle overlay").clicked() {
                        self.show_overlay = !self.show_overlay;
                        self.save_settings();
                    }
                });
            });
            ui.add_space(theme::SPACING_MD);

            let mut side_by_side = self.view_mode == ViewMode::SideBySide;
            if theme::segmented_toggle(ui, "Side-by-Side", "AI Overlay", &mut side_by_side) {
                self.view_mode = if side_by_side { ViewMode::SideBySide } else { ViewMode::Overlay };
                self.save_settings();
            }
            ui.add_space(theme::SPACING_MD);

            let scale = self.zoom as f32 / 100.0;
            egui::ScrollArea::both()
                .id_salt("analysis_images")
                .max_height(theme::ANALYSIS_IMG_HEIGHT * 1.2)
                .show(ui, |ui| match self.view_mode {
                    ViewMode::SideBySide => {
                        ui.columns(2, |cols| {
                            cols[0].label(egui::RichText::new("Original Image").color(theme::TEXT_MUTED));
                            self.analysis_image(&mut cols[0], scale, false);
                            cols[1].label(egui::RichText::new("AI Analysis").color(theme::TEXT_MUTED));
                            self.analysis_image(&mut cols[1], scale, self.show_overlay);
                        });
                    }
                    ViewMode::Overlay => {
                        self.analysis_image(ui, scale, self.show_overlay);
                    }
                });

            ui.add_space(theme::SPACING_MD);
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 5.0, theme::OVERLAY_LESION);
                ui.label(
                    egui::RichText::new(format!("Affected Area ({})", diagnosis.affected_percent()))
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                );
            });
        });
    }

    /// Uploaded image (or a placeholder) scaled by zoom, with optional lesion overlay
    fn analysis_image(&self, ui: &mut egui::Ui, scale: f32, overlay: bool) {
        let max = egui::vec2(ui.available_width(), theme::ANALYSIS_IMG_HEIGHT);
        let rect = match &self.upload.preview {
            Some(texture) => {
                let size = fit_size(texture.size(), max) * scale;
                ui.image(egui::load::SizedTexture::new(texture.id(), size)).rect
            }
            None => {
                let (rect, _) = ui.allocate_exact_size(max * scale, egui::Sense::hover());
                ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_DROPZONE);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    icons::LEAF,
                    egui::FontId::proportional(64.0 * scale),
                    theme::ACCENT_MUTED,
                );
                rect
            }
        };

        if overlay {
            let painter = ui.painter_at(rect);
            let unit = rect.width().min(rect.height());
            for (x, y, r) in LESIONS {
                let center = egui::pos2(rect.left() + rect.width() * x, rect.top() + rect.height() * y);
                painter.circle(
                    center,
                    unit * r,
                    theme::OVERLAY_LESION,
                    egui::Stroke::new(theme::STROKE_MEDIUM, theme::STATUS_ERROR),
                );
            }
        }
    }

    fn render_diagnosis_summary(&mut self, ui: &mut egui::Ui, diagnosis: &Diagnosis) {
        let confidence = confidence_color(diagnosis.confidence_level());
        let severity = severity_color(diagnosis.severity_level());

        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            components::section_heading(ui, icons::CHART_BAR, "Analysis Metrics");
            components::metric_bar(
                ui,
                "Disease Confidence",
                &diagnosis.confidence_percent(),
                diagnosis.confidence,
                confidence,
            );
            ui.add_space(theme::SPACING_MD);
            components::metric_bar(
                ui,
                "Leaf Area Affected",
                &diagnosis.affected_percent(),
                diagnosis.affected_area,
                theme::STATUS_WARNING,
            );
        });
        ui.add_space(theme::SPACING_LG);

        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            components::section_heading(ui, icons::BUG, "Diagnosis");
            ui.label(
                egui::RichText::new(&diagnosis.disease_class)
                    .size(theme::FONT_TITLE)
                    .color(theme::TEXT_PRIMARY)
                    .strong(),
            );
            ui.label(
                egui::RichText::new(format!("{} pathogen detected", diagnosis.pathogen))
                    .italics()
                    .color(theme::TEXT_MUTED),
            );
            ui.add_space(theme::SPACING_MD);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Confidence Level").color(theme::TEXT_MUTED));
                components::badge(ui, &diagnosis.confidence_percent(), confidence);
            });
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Severity").color(theme::TEXT_MUTED));
                components::badge(ui, &diagnosis.severity, severity);
            });
        });
        ui.add_space(theme::SPACING_LG);

        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            components::section_heading(ui, icons::INFO, "Analysis Metadata");
            let meta = &diagnosis.metadata;
            components::info_row(ui, icons::CALENDAR, "Date", &meta.date);
            components::info_row(ui, icons::CLOCK, "Processing Time", &meta.analysis_time);
            components::info_row(ui, icons::CPU, "Model Version", &meta.model_version);
            components::info_row(ui, icons::RULER, "Resolution", &meta.resolution);
        });
        ui.add_space(theme::SPACING_LG);

        if ui
            .add(
                theme::button_accent(format!("{}  Generate Full Report", icons::FILE_TEXT))
                    .min_size(egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT_LARGE)),
            )
            .clicked()
        {
            self.export(diagnosis, ExportKind::Report);
        }
        ui.add_space(theme::SPACING_SM);
        let half = (ui.available_width() - theme::SPACING_MD) / 2.0;
        ui.horizontal(|ui| {
            if ui
                .add(
                    theme::button(format!("{}  New Analysis", icons::ARROW_COUNTER_CLOCKWISE))
                        .min_size(egui::vec2(half, theme::BUTTON_HEIGHT)),
                )
                .clicked()
            {
                self.upload.reset();
                self.navigate(Screen::Upload);
            }
            if ui
                .add(
                    theme::button(format!("{}  Save Dataset", icons::DOWNLOAD_SIMPLE))
                        .min_size(egui::vec2(half, theme::BUTTON_HEIGHT)),
                )
                .clicked()
            {
                self.export(diagnosis, ExportKind::Json);
            }
        });
    }

    fn export(&mut self, diagnosis: &Diagnosis, kind: ExportKind) {
        let (title, file_name, filter, ext) = match kind {
            ExportKind::Json => ("Export diagnosis data", "diagnosis.json", "JSON", "json"),
            ExportKind::Report => ("Save diagnostic report", "diagnostic-report.txt", "Text", "txt"),
        };
        let Some(path) = rfd::FileDialog::new()
            .set_title(title)
            .set_directory(self.settings().browse_dir_or_default())
            .set_file_name(file_name)
            .add_filter(filter, &[ext])
            .save_file()
        else {
            return;
        };

        match write_export(diagnosis, kind, &path) {
            Ok(()) => {
                self.show_toast(
                    "Export complete",
                    &format!("Saved {}", path.display()),
                    ToastKind::Success,
                );
                if let Some(dir) = path.parent() {
                    reveal(dir);
                }
            }
            Err(e) => {
                warn!(error = %e, kind = ?kind, "Export failed");
                self.show_toast("Export failed", &e.to_string(), ToastKind::Destructive);
            }
        }
    }
}

fn write_export(diagnosis: &Diagnosis, kind: ExportKind, path: &Path) -> Result<(), ExportError> {
    match kind {
        ExportKind::Json => diagnosis.export_json(path),
        ExportKind::Report => diagnosis.export_report(path),
    }
}

/// Open the folder an export was written to
fn reveal(dir: &Path) {
    match open::that(dir) {
        Ok(()) => info!(path = %dir.display(), "Opened export folder"),
        Err(e) => warn!(error = %e, path = %dir.display(), "Could not open export folder"),
    }
}

fn render_treatment(ui: &mut egui::Ui, diagnosis: &Diagnosis) {
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        components::section_heading(ui, icons::FIRST_AID_KIT, "Treatment Recommendations");
        for (i, step) in diagnosis.treatment.iter().enumerate() {
            ui.horizontal_top(|ui| {
                ui.label(
                    egui::RichText::new(format!("{}.", i + 1))
                        .color(theme::ACCENT)
                        .strong(),
                );
                ui.label(egui::RichText::new(step).color(theme::TEXT_SECONDARY));
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_colors_follow_thresholds() {
        assert_eq!(confidence_color(ConfidenceLevel::from_score(0.95)), theme::STATUS_SUCCESS);
        assert_eq!(confidence_color(ConfidenceLevel::from_score(0.75)), theme::STATUS_WARNING);
        assert_eq!(confidence_color(ConfidenceLevel::from_score(0.2)), theme::STATUS_ERROR);
    }

    #[test]
    fn severity_colors() {
        assert_eq!(severity_color(Severity::parse("low")), theme::STATUS_SUCCESS);
        assert_eq!(severity_color(Severity::parse("Moderate")), theme::STATUS_WARNING);
        assert_eq!(severity_color(Severity::parse("HIGH")), theme::STATUS_ERROR);
        assert_eq!(severity_color(Severity::parse("n/a")), theme::TEXT_MUTED);
    }

    #[test]
    fn write_export_dispatches_by_kind() {
        let tmp = tempfile::TempDir::new().unwrap();
        let d = Diagnosis::sample(None);

        let json = tmp.path().join("d.json");
        write_export(&d, ExportKind::Json, &json).unwrap();
        assert!(std::fs::read_to_string(&json).unwrap().trim_start().starts_with('{'));

        let report = tmp.path().join("r.txt");
        write_export(&d, ExportKind::Report, &report).unwrap();
        assert!(std::fs::read_to_string(&report).unwrap().contains("Diagnostic Report"));
    }
}
