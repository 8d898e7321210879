//! Landing screen

use super::App;
use crate::constants::APP_NAME;
use crate::theme;
use crate::types::Screen;
use crate::ui::components;
use eframe::egui;
use egui_phosphor::regular as icons;

const FEATURES: [(&str, &str, &str); 6] = [
    (
        icons::CPU,
        "Real-time CNN Diagnostics",
        "Advanced convolutional neural networks for instant disease identification",
    ),
    (
        icons::TARGET,
        "95%+ Accuracy Rate",
        "Research-validated models trained on 10,000+ plant pathology samples",
    ),
    (
        icons::LIGHTNING,
        "Early Detection",
        "Identify diseases before visible symptoms appear with spectral analysis",
    ),
    (
        icons::DATABASE,
        "Comprehensive Database",
        "500+ disease classifications across major crop species",
    ),
    (
        icons::FLASK,
        "Research Integration",
        "Export-ready data for scientific publications and field studies",
    ),
    (
        icons::PLANT,
        "Multi-Crop Support",
        "Tomato, corn, wheat, soybean, and 20+ other crop varieties",
    ),
];

impl App {
    pub(crate) fn render_landing(&mut self, ui: &mut egui::Ui) {
        ui.add_space(48.0);
        self.render_hero(ui);
        ui.add_space(56.0);

        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Research-Grade Plant Pathology")
                    .size(theme::FONT_DISPLAY)
                    .color(theme::TEXT_PRIMARY)
                    .strong(),
            );
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new(
                    "Built for agricultural scientists, field researchers, and crop protection specialists \
                     who demand precision and scientific rigor in their diagnostic tools.",
                )
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_MUTED),
            );
        });
        ui.add_space(theme::SPACING_SECTION);

        for row in FEATURES.chunks(3) {
            ui.columns(3, |cols| {
                for (col, (icon, title, description)) in cols.iter_mut().zip(row) {
                    components::feature_card(col, icon, title, description);
                }
            });
            ui.add_space(theme::SPACING_LG);
        }

        ui.add_space(48.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Ready to Advance Your Research?")
                    .size(theme::FONT_DISPLAY)
                    .color(theme::TEXT_PRIMARY)
                    .strong(),
            );
            ui.label(
                egui::RichText::new(format!(
                    "Join thousands of agricultural researchers using {} for precision plant pathology analysis.",
                    APP_NAME
                ))
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_MUTED),
            );
            ui.add_space(theme::SPACING_XL);
            let start = ui.add(
                theme::button_accent("Start Analysis")
                    .min_size(egui::vec2(180.0, theme::BUTTON_HEIGHT_LARGE)),
            );
            if start.clicked() {
                self.navigate(Screen::Upload);
            }
        });

        ui.add_space(56.0);
        render_footer(ui);
    }

    fn render_hero(&mut self, ui: &mut egui::Ui) {
        ui.columns(2, |cols| {
            let ui = &mut cols[0];
            ui.label(
                egui::RichText::new("Precision Plant")
                    .size(theme::FONT_HERO)
                    .color(theme::TEXT_PRIMARY)
                    .strong(),
            );
            ui.label(
                egui::RichText::new("Pathology")
                    .size(theme::FONT_HERO)
                    .color(theme::ACCENT)
                    .strong(),
            );
            ui.add_space(theme::SPACING_XL);
            ui.label(
                egui::RichText::new(
                    "Advanced AI-powered crop disease detection for agricultural researchers. \
                     Upload plant images and receive instant, scientifically-validated diagnostic reports.",
                )
                .size(theme::FONT_TITLE)
                .color(theme::TEXT_MUTED),
            );
            ui.add_space(theme::SPACING_XL);
            let analyze = ui.add(
                theme::button_accent(format!("{}  Analyze Image", icons::LEAF))
                    .min_size(egui::vec2(180.0, theme::BUTTON_HEIGHT_LARGE)),
            );
            if analyze.clicked() {
                self.navigate(Screen::Upload);
            }
            ui.add_space(theme::SPACING_XL);
            ui.horizontal(|ui| {
                for (icon, label) in [
                    (icons::LIGHTNING, "Real-time Analysis"),
                    (icons::SHIELD_CHECK, "Research Grade"),
                    (icons::DOWNLOAD_SIMPLE, "Export Ready"),
                ] {
                    ui.label(
                        egui::RichText::new(format!("{} {}", icon, label))
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_MUTED),
                    );
                    ui.add_space(theme::SPACING_MD);
                }
            });

            let ui = &mut cols[1];
            theme::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.add_space(theme::SPACING_XL);
                    ui.label(egui::RichText::new(icons::MICROSCOPE).size(96.0).color(theme::ACCENT));
                    ui.add_space(theme::SPACING_XL);
                });
                ui.columns(2, |stats| {
                    hero_stat(&mut stats[0], "95.3%", "Detection Accuracy");
                    hero_stat(&mut stats[1], "2.1s", "Analysis Time");
                });
            });
        });
    }
}

fn hero_stat(ui: &mut egui::Ui, value: &str, label: &str) {
    theme::section_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(value)
                    .size(theme::FONT_DISPLAY)
                    .color(theme::ACCENT)
                    .strong(),
            );
            ui.label(egui::RichText::new(label).size(theme::FONT_LABEL).color(theme::TEXT_MUTED));
        });
    });
}

fn render_footer(ui: &mut egui::Ui) {
    ui.separator();
    ui.add_space(theme::SPACING_XL);
    ui.columns(4, |cols| {
        cols[0].label(
            egui::RichText::new(format!("{}  {}", icons::LEAF, APP_NAME))
                .size(theme::FONT_TITLE)
                .color(theme::TEXT_PRIMARY)
                .strong(),
        );
        cols[0].label(
            egui::RichText::new("Advancing agricultural research through precision AI diagnostics.")
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        );
        let sections = [
            ("Research", ["Publications", "Datasets", "API Documentation"]),
            ("Tools", ["Disease Detection", "Batch Analysis", "Export Reports"]),
            ("Support", ["Research Portal", "Integration Guide", "Contact Team"]),
        ];
        for (col, (title, links)) in cols[1..].iter_mut().zip(sections) {
            col.label(egui::RichText::new(title).color(theme::TEXT_PRIMARY).strong());
            for link in links {
                col.label(egui::RichText::new(link).size(theme::FONT_LABEL).color(theme::TEXT_MUTED));
            }
        }
    });
    ui.add_space(theme::SPACING_XL);
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(format!(
                "© 2024 {}. Built for agricultural research excellence.",
                APP_NAME
            ))
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(theme::SPACING_XL);
}
