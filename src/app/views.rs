//! Navigation bar and screen dispatch

use super::App;
use crate::constants::APP_NAME;
use crate::theme;
use crate::types::Screen;
use crate::ui::components;
use eframe::egui;

impl App {
    pub(crate) fn render_nav(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("nav")
            .exact_height(theme::NAV_HEIGHT)
            .show_separator_line(false)
            .frame(theme::nav_frame())
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let brand = ui
                        .horizontal(|ui| {
                            if let Some(texture) = self.logo(ctx) {
                                ui.image(egui::load::SizedTexture::new(
                                    texture.id(),
                                    egui::vec2(28.0, 28.0),
                                ));
                            }
                            ui.label(
                                egui::RichText::new(APP_NAME)
                                    .size(theme::FONT_TITLE)
                                    .color(theme::TEXT_PRIMARY)
                                    .strong(),
                            );
                        })
                        .response
                        .interact(egui::Sense::click());
                    if brand.clicked() {
                        self.navigate(Screen::Landing);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        for screen in Screen::NAV.iter().rev() {
                            if nav_link(ui, screen.label(), self.screen == *screen) {
                                self.navigate(*screen);
                            }
                            ui.add_space(theme::SPACING_LG);
                        }
                    });
                });
            });
    }

    pub(crate) fn render_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| {
                self.central_panel_rect = Some(ui.max_rect());
                egui::ScrollArea::vertical()
                    .id_salt(self.screen.label())
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        components::centered_column(ui, |ui| match self.screen {
                            Screen::Landing => self.render_landing(ui),
                            Screen::Upload => self.render_upload(ui, ctx),
                            Screen::Results => self.render_results(ui),
                        });
                    });
            });
    }
}

/// Text link in the navigation bar. Returns true if clicked.
fn nav_link(ui: &mut egui::Ui, label: &str, active: bool) -> bool {
    let color = if active { theme::ACCENT } else { theme::TEXT_MUTED };
    let response = ui.add(
        egui::Label::new(egui::RichText::new(label).size(theme::FONT_BODY).color(color))
            .sense(egui::Sense::click())
            .selectable(false),
    );
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}
