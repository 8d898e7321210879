//! Toast notifications (bottom-right of the central panel)

use super::App;
use crate::constants::{TOAST_FADE_SECS, TOAST_VISIBLE_SECS};
use crate::theme;
use crate::types::{Toast, ToastKind};
use eframe::egui;

/// Opacity for a toast `elapsed` seconds old, or None once it has expired
pub(crate) fn toast_alpha(elapsed: f32) -> Option<f32> {
    let total = TOAST_VISIBLE_SECS + TOAST_FADE_SECS;
    if elapsed >= total {
        None
    } else if elapsed > TOAST_VISIBLE_SECS {
        Some((total - elapsed) / TOAST_FADE_SECS)
    } else {
        Some(1.0)
    }
}

impl App {
    pub(crate) fn show_toast(&mut self, title: &str, description: &str, kind: ToastKind) {
        self.toast = Some(Toast::new(title, description, kind));
    }

    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(toast), Some(panel_rect)) = (self.toast.clone(), self.central_panel_rect) else {
            return;
        };

        let elapsed = toast.start.elapsed().as_secs_f32();
        let Some(alpha) = toast_alpha(elapsed) else {
            self.toast = None;
            return;
        };

        let accent = match toast.kind {
            ToastKind::Success => theme::ACCENT,
            ToastKind::Destructive => theme::STATUS_ERROR,
        };
        let icon = match toast.kind {
            ToastKind::Success => egui_phosphor::regular::CHECK_CIRCLE,
            ToastKind::Destructive => egui_phosphor::regular::X_CIRCLE,
        };
        let fade = |c: egui::Color32, a: f32| {
            egui::Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), (a * alpha) as u8)
        };
        let margin = 16.0;
        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(fade(theme::BG_ELEVATED, 240.0))
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, fade(accent, 120.0)))
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(icon).size(18.0).color(fade(accent, 255.0)));
                            ui.vertical(|ui| {
                                ui.label(
                                    egui::RichText::new(&toast.title)
                                        .strong()
                                        .color(fade(theme::TEXT_PRIMARY, 255.0)),
                                );
                                ui.label(
                                    egui::RichText::new(&toast.description)
                                        .size(theme::FONT_LABEL)
                                        .color(fade(theme::TEXT_MUTED, 255.0)),
                                );
                            });
                        });
                    });
            });

        // Pause timer while hovering
        if response.response.hovered() {
            if let Some(t) = self.toast.as_mut() {
                t.start = std::time::Instant::now();
            }
        }
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_fades_then_expires() {
        assert_eq!(toast_alpha(0.0), Some(1.0));
        assert_eq!(toast_alpha(TOAST_VISIBLE_SECS), Some(1.0));
        let mid = toast_alpha(TOAST_VISIBLE_SECS + TOAST_FADE_SECS / 2.0).unwrap();
        assert!((mid - 0.5).abs() < 1e-4);
        assert_eq!(toast_alpha(TOAST_VISIBLE_SECS + TOAST_FADE_SECS), None);
        assert_eq!(toast_alpha(60.0), None);
    }
}
