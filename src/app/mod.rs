//! App module - contains the main application state and logic

mod landing;
mod results;
mod toast;
mod upload;
mod views;

pub use upload::UploadState;

use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use crate::utils;
use eframe::egui;
use std::path::PathBuf;
use tracing::debug;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) screen: Screen,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) data_dir: PathBuf,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Upload screen
    pub(crate) upload: UploadState,
    pub(crate) last_browse_dir: Option<String>,
    // Results screen
    pub(crate) view_mode: ViewMode,
    pub(crate) show_overlay: bool,
    pub(crate) zoom: u32,
    // Toast notification
    pub(crate) toast: Option<Toast>,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self {
            screen: Screen::Landing,
            runtime,
            data_dir,
            logo_texture: None,
            upload: UploadState::default(),
            last_browse_dir: settings.last_browse_dir.clone(),
            view_mode: settings.view_mode,
            show_overlay: settings.show_overlay,
            zoom: settings.zoom,
            toast: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            last_browse_dir: self.last_browse_dir.clone(),
            view_mode: self.view_mode,
            show_overlay: self.show_overlay,
            zoom: self.zoom,
        }
    }

    pub fn save_settings(&self) {
        self.settings().save(&self.data_dir);
    }

    pub fn navigate(&mut self, screen: Screen) {
        if self.screen != screen {
            debug!(from = ?self.screen, to = ?screen, "Navigate");
            self.screen = screen;
        }
    }

    /// Leaf logo texture, rasterized on first use
    pub(crate) fn logo(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        if self.logo_texture.is_none() {
            let (pixels, w, h) = utils::rasterize_logo(64)?;
            self.logo_texture = Some(ctx.load_texture(
                "logo",
                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                egui::TextureOptions::LINEAR,
            ));
        }
        self.logo_texture.clone()
    }
}
