//! Upload screen: file selection, validation, preview and the simulated analysis

use super::App;
use crate::constants::*;
use crate::progress::{self, simulate_analysis, Pacing};
use crate::theme;
use crate::types::*;
use crate::ui::components;
use crate::utils::fit_size;
use crate::validation::{validate_file, FileCandidate, FileValidation, UploadError};
use eframe::egui;
use egui_phosphor::regular as icons;
use image::imageops::FilterType;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Pixels decoded off the UI thread, capped for display
pub(crate) struct DecodedImage {
    /// Dimensions of the source image
    pub width: u32,
    pub height: u32,
    /// Size of `rgba`, at most `PREVIEW_MAX_SIDE` on either side
    pub preview_size: [usize; 2],
    pub rgba: Vec<u8>,
}

/// Result of decoding the selected image off the UI thread
pub(crate) enum DecodeOutcome {
    Decoded {
        generation: u64,
        image: DecodedImage,
    },
    Failed {
        generation: u64,
        error: String,
    },
}

pub struct UploadState {
    pub(crate) drag_active: bool,
    pub(crate) selected: Option<FileCandidate>,
    pub(crate) validation: FileValidation,
    pub(crate) preview: Option<egui::TextureHandle>,
    pub(crate) decoded: Arc<Mutex<Option<DecodeOutcome>>>,
    /// Bumped on every new selection/reset so stale decodes are dropped
    pub(crate) generation: u64,
    pub(crate) analysis: Arc<Mutex<AnalysisState>>,
    pub(crate) cancel_token: Option<CancellationToken>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            drag_active: false,
            selected: None,
            validation: FileValidation::default(),
            preview: None,
            decoded: Arc::new(Mutex::new(None)),
            generation: 0,
            analysis: Arc::new(Mutex::new(AnalysisState::default())),
            cancel_token: None,
        }
    }
}

impl UploadState {
    pub(crate) fn can_process(&self) -> bool {
        self.selected.is_some()
            && self.validation.is_valid
            && !progress::lock(&self.analysis).is_processing()
    }

    pub(crate) fn analysis_snapshot(&self) -> (u8, AnalysisStatus) {
        let s = progress::lock(&self.analysis);
        (s.progress, s.status)
    }

    /// Resolution of the selected image once known
    pub(crate) fn measured_resolution(&self) -> Option<&str> {
        if self.validation.is_valid && !self.validation.is_resolving() {
            self.validation
                .resolution
                .as_deref()
                .filter(|r| *r != RESOLUTION_UNAVAILABLE)
        } else {
            None
        }
    }

    fn cancel_analysis(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        // Cancelled tasks keep their own handle, so they can never write into the next run
        self.analysis = Arc::new(Mutex::new(AnalysisState::default()));
    }

    /// Make `candidate` the current selection if it passes validation.
    /// A rejected file still clears whatever was selected before.
    /// Returns the notification to show for the outcome.
    pub(crate) fn select(&mut self, candidate: FileCandidate) -> Toast {
        self.reset();
        self.validation = validate_file(&candidate);

        if self.validation.is_valid {
            info!(name = %candidate.name, size = candidate.size, "File accepted");
            self.selected = Some(candidate);
            Toast::new(
                "File uploaded successfully",
                "Image is ready for analysis",
                ToastKind::Success,
            )
        } else {
            let error = self.validation.error.clone().unwrap_or_default();
            warn!(name = %candidate.name, mime = %candidate.mime, size = candidate.size, %error, "File rejected");
            Toast::new("Upload failed", error, ToastKind::Destructive)
        }
    }

    /// Apply a finished decode to the current selection.
    /// Returns the preview pixels to upload, or None for a failed or stale outcome.
    pub(crate) fn apply_decode(&mut self, outcome: DecodeOutcome) -> Option<DecodedImage> {
        match outcome {
            DecodeOutcome::Decoded { generation, image } if generation == self.generation => {
                debug!(width = image.width, height = image.height, "Image decoded");
                self.validation = self.validation.with_resolution(image.width, image.height);
                Some(image)
            }
            DecodeOutcome::Failed { generation, error } if generation == self.generation => {
                warn!(%error, "Accepted image could not be decoded");
                self.validation.resolution = Some(RESOLUTION_UNAVAILABLE.to_string());
                None
            }
            _ => {
                debug!("Discarded stale decode result");
                None
            }
        }
    }

    /// Drop the current selection, its preview and any in-flight work
    pub(crate) fn reset(&mut self) {
        self.cancel_analysis();
        self.generation += 1;
        self.decoded = Arc::new(Mutex::new(None));
        self.selected = None;
        self.validation = FileValidation::default();
        self.preview = None;
        self.drag_active = false;
    }
}

fn decode_candidate(candidate: &FileCandidate) -> Result<image::DynamicImage, UploadError> {
    let img = match (&candidate.path, &candidate.bytes) {
        (_, Some(bytes)) => image::load_from_memory(bytes)?,
        (Some(path), None) => image::open(path)?,
        (None, None) => {
            return Err(UploadError::Io {
                path: PathBuf::from(&candidate.name),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no file contents"),
            })
        }
    };
    Ok(img)
}

/// Decode the candidate, keeping its true dimensions but shrinking the pixels to `max_side`
fn decode_for_preview(candidate: &FileCandidate, max_side: u32) -> Result<DecodedImage, UploadError> {
    let img = decode_candidate(candidate)?;
    let (width, height) = (img.width(), img.height());
    let img = if width > max_side || height > max_side {
        img.resize(max_side, max_side, FilterType::Triangle)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    Ok(DecodedImage {
        width,
        height,
        preview_size: [rgba.width() as usize, rgba.height() as usize],
        rgba: rgba.into_raw(),
    })
}

impl App {
    /// Validate a picked or dropped file and make it the current selection if accepted
    pub(crate) fn select_file(&mut self, ctx: &egui::Context, candidate: FileCandidate) {
        let toast = self.upload.select(candidate);
        if self.upload.selected.is_some() {
            self.start_decode(ctx);
        }
        self.toast = Some(toast);
    }

    pub(crate) fn browse_file(&mut self, ctx: &egui::Context) {
        let start_dir = self.settings().browse_dir_or_default();
        let Some(path) = rfd::FileDialog::new()
            .set_title("Select a leaf image")
            .set_directory(&start_dir)
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };

        if let Some(parent) = path.parent() {
            self.last_browse_dir = Some(parent.to_string_lossy().to_string());
            self.save_settings();
        }

        match FileCandidate::from_path(&path) {
            Ok(candidate) => self.select_file(ctx, candidate),
            Err(e) => {
                warn!(error = %e, "Could not read picked file");
                self.show_toast("Upload failed", "The selected file could not be read", ToastKind::Destructive);
            }
        }
    }

    /// Track drag-hover and pick up dropped files (first one wins)
    pub(crate) fn handle_file_drop(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.first().cloned())
        });
        self.upload.drag_active = hovering && self.screen == Screen::Upload;

        let Some(file) = dropped else {
            return;
        };
        self.navigate(Screen::Upload);

        let candidate = if let Some(bytes) = file.bytes.clone() {
            Ok(FileCandidate::from_bytes(&file.name, &file.mime, bytes))
        } else if let Some(path) = &file.path {
            FileCandidate::from_path(path).map(|mut c| {
                if !file.mime.is_empty() {
                    c.mime = file.mime.clone();
                }
                c
            })
        } else {
            debug!("Dropped file carried neither a path nor bytes");
            return;
        };

        match candidate {
            Ok(candidate) => self.select_file(ctx, candidate),
            Err(e) => {
                warn!(error = %e, "Could not read dropped file");
                self.show_toast("Upload failed", "The dropped file could not be read", ToastKind::Destructive);
            }
        }
    }

    fn start_decode(&mut self, ctx: &egui::Context) {
        let Some(candidate) = self.upload.selected.clone() else {
            return;
        };
        let generation = self.upload.generation;
        let slot = self.upload.decoded.clone();
        let ctx = ctx.clone();

        self.runtime.spawn_blocking(move || {
            let outcome = match decode_for_preview(&candidate, PREVIEW_MAX_SIDE) {
                Ok(image) => DecodeOutcome::Decoded { generation, image },
                Err(e) => DecodeOutcome::Failed {
                    generation,
                    error: e.to_string(),
                },
            };
            *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(outcome);
            ctx.request_repaint();
        });
    }

    /// Apply a finished decode: fill in the resolution and build the preview texture
    pub(crate) fn poll_decode(&mut self, ctx: &egui::Context) {
        let Some(outcome) = self
            .upload
            .decoded
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        else {
            return;
        };

        if let Some(image) = self.upload.apply_decode(outcome) {
            self.upload.preview = Some(ctx.load_texture(
                format!("upload_preview_{}", self.upload.generation),
                egui::ColorImage::from_rgba_unmultiplied(image.preview_size, &image.rgba),
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    pub(crate) fn process_image(&mut self, ctx: &egui::Context) {
        if !self.upload.can_process() {
            return;
        }
        self.upload.cancel_analysis();

        let token = CancellationToken::new();
        self.upload.cancel_token = Some(token.clone());
        let state = self.upload.analysis.clone();
        let ctx = ctx.clone();

        info!("Starting analysis simulation");
        self.runtime.spawn(async move {
            simulate_analysis(state, Pacing::default(), token, move || ctx.request_repaint()).await;
        });
        // Mark processing now so the button disables on this frame
        progress::lock(&self.upload.analysis).status = AnalysisStatus::Processing;
    }

    pub(crate) fn poll_analysis(&mut self) {
        let notice = progress::lock(&self.upload.analysis).take_notice();
        if notice {
            self.upload.cancel_token = None;
            self.show_toast(
                "Analysis complete",
                "Image has been processed successfully",
                ToastKind::Success,
            );
        }
    }

    // ========================================================================
    // RENDERING
    // ========================================================================

    pub(crate) fn render_upload(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.add_space(theme::SPACING_SECTION);
        ui.label(
            egui::RichText::new("Disease Detection Analysis")
                .size(theme::FONT_DISPLAY)
                .color(theme::TEXT_PRIMARY)
                .strong(),
        );
        ui.label(
            egui::RichText::new(
                "Upload a high-resolution image of a plant leaf for AI-powered disease detection and analysis",
            )
            .size(theme::FONT_BODY)
            .color(theme::TEXT_MUTED),
        );
        ui.add_space(theme::SPACING_XL);

        ui.columns(2, |cols| {
            self.render_upload_main(&mut cols[0], ctx);
            render_requirements(&mut cols[1]);
        });
        ui.add_space(theme::SPACING_SECTION);
    }

    fn render_upload_main(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            components::section_heading(ui, icons::UPLOAD_SIMPLE, "Upload Image");
            self.render_dropzone(ui, ctx);
        });

        if self.upload.selected.is_some() && self.upload.validation.is_valid {
            ui.add_space(theme::SPACING_LG);
            self.render_preview_card(ui);
        }

        ui.add_space(theme::SPACING_LG);
        self.render_actions(ui, ctx);
    }

    fn render_dropzone(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let width = ui.available_width();
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(width, theme::DROPZONE_HEIGHT),
            egui::Sense::click(),
        );
        let look = DropzoneLook::of(&self.upload);
        let (fill, stroke, icon, icon_color) = match &look {
            DropzoneLook::Dragging => (theme::BG_HOVER, theme::ACCENT, icons::DOWNLOAD_SIMPLE, theme::ACCENT),
            DropzoneLook::Ready => (
                theme::BG_DROPZONE,
                theme::STATUS_SUCCESS,
                icons::CHECK_CIRCLE,
                theme::STATUS_SUCCESS,
            ),
            DropzoneLook::Error(_) => (
                theme::BG_DROPZONE,
                theme::STATUS_ERROR,
                icons::X_CIRCLE,
                theme::STATUS_ERROR,
            ),
            DropzoneLook::Idle if response.hovered() => {
                (theme::BG_HOVER, theme::ACCENT_MUTED, icons::CAMERA, theme::ACCENT)
            }
            DropzoneLook::Idle => (theme::BG_DROPZONE, theme::BORDER_DEFAULT, icons::CAMERA, theme::TEXT_MUTED),
        };
        let detail_color = match &look {
            DropzoneLook::Error(_) => theme::STATUS_ERROR,
            _ => theme::TEXT_DIM,
        };

        let painter = ui.painter();
        painter.rect_filled(rect, theme::RADIUS_LARGE, fill);
        painter.rect_stroke(
            rect,
            theme::RADIUS_LARGE,
            egui::Stroke::new(theme::STROKE_THICK, stroke),
            egui::StrokeKind::Inside,
        );

        let center = rect.center();
        painter.text(
            center - egui::vec2(0.0, 40.0),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(40.0),
            icon_color,
        );
        painter.text(
            center + egui::vec2(0.0, 10.0),
            egui::Align2::CENTER_CENTER,
            look.title(),
            egui::FontId::proportional(theme::FONT_HEADING),
            theme::TEXT_PRIMARY,
        );
        painter.text(
            center + egui::vec2(0.0, 34.0),
            egui::Align2::CENTER_CENTER,
            "or click to browse files",
            egui::FontId::proportional(theme::FONT_LABEL),
            theme::TEXT_MUTED,
        );
        painter.text(
            center + egui::vec2(0.0, 64.0),
            egui::Align2::CENTER_CENTER,
            look.detail(),
            egui::FontId::proportional(theme::FONT_SMALL),
            detail_color,
        );

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        let busy = progress::lock(&self.upload.analysis).is_processing();
        if response.clicked() && !busy {
            self.browse_file(ctx);
        }
    }

    fn render_preview_card(&mut self, ui: &mut egui::Ui) {
        let (progress_value, status) = self.upload.analysis_snapshot();

        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                components::section_heading(ui, icons::FILE_IMAGE, "Image Preview");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(theme::button(format!("{}  Remove", icons::X_CIRCLE))).clicked() {
                        info!("Upload reset");
                        self.upload.reset();
                    }
                });
            });

            let max = egui::vec2(ui.available_width(), theme::PREVIEW_HEIGHT);
            match &self.upload.preview {
                Some(texture) => {
                    let size = fit_size(texture.size(), max);
                    ui.vertical_centered(|ui| {
                        ui.image(egui::load::SizedTexture::new(texture.id(), size));
                    });
                }
                None => {
                    let (rect, _) = ui.allocate_exact_size(max, egui::Sense::hover());
                    ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_DROPZONE);
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Loading preview...",
                        egui::FontId::proportional(theme::FONT_LABEL),
                        theme::TEXT_DIM,
                    );
                }
            }

            ui.add_space(theme::SPACING_LG);
            theme::section_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                let name = self
                    .upload
                    .selected
                    .as_ref()
                    .map(|c| c.name.as_str())
                    .unwrap_or_default();
                let validation = &self.upload.validation;
                components::info_row(ui, icons::FILE_IMAGE, "File:", name);
                components::info_row(ui, icons::DATABASE, "Size:", validation.size.as_deref().unwrap_or("-"));
                components::info_row(
                    ui,
                    icons::RULER,
                    "Resolution:",
                    validation.resolution.as_deref().unwrap_or("-"),
                );
            });

            if status == AnalysisStatus::Processing {
                ui.add_space(theme::SPACING_LG);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new("Processing...").color(theme::TEXT_SECONDARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("{}%", progress_value))
                                .color(theme::TEXT_MUTED),
                        );
                    });
                });
                components::progress_bar(ui, progress_value as f32 / PROGRESS_MAX as f32, theme::ACCENT);
            }
        });
    }

    /// Process Image / View Results row, shown whether or not a file is selected
    fn render_actions(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let processing = progress::lock(&self.upload.analysis).is_processing();
        let height = theme::BUTTON_HEIGHT_LARGE;
        let half = (ui.available_width() - theme::SPACING_MD) / 2.0;

        ui.horizontal(|ui| {
            let label = if processing {
                format!("{}  Processing...", icons::CLOCK)
            } else {
                format!("{}  Process Image", icons::MICROSCOPE)
            };
            let process = ui.add_enabled(
                self.upload.can_process(),
                theme::button_accent(label).min_size(egui::vec2(half, height)),
            );
            if process.clicked() {
                self.process_image(ctx);
            }

            let view = ui.add_enabled(
                !processing,
                theme::button(format!("{}  View Results", icons::ARROW_RIGHT))
                    .min_size(egui::vec2(half, height)),
            );
            if view.clicked() {
                self.navigate(Screen::Results);
            }
        });
    }
}

/// Appearance of the drop zone for the current upload state
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DropzoneLook {
    Dragging,
    Ready,
    Error(String),
    Idle,
}

impl DropzoneLook {
    pub(crate) fn of(upload: &UploadState) -> Self {
        if upload.drag_active {
            Self::Dragging
        } else if upload.selected.is_some() && upload.validation.is_valid {
            Self::Ready
        } else if let Some(error) = &upload.validation.error {
            Self::Error(error.clone())
        } else {
            Self::Idle
        }
    }

    fn title(&self) -> &str {
        match self {
            Self::Dragging => "Drop image here",
            Self::Ready => "Image Ready for Analysis",
            Self::Error(_) => "Upload Error",
            Self::Idle => "Drag and drop your image here",
        }
    }

    fn detail(&self) -> &str {
        match self {
            Self::Error(error) => error,
            _ => "PNG or JPG, up to 5MB",
        }
    }
}

fn render_requirements(ui: &mut egui::Ui) {
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        components::section_heading(ui, icons::INFO, "Analysis Requirements");
        let rows = [
            (icons::CAMERA, "Image Quality", "High resolution, well-lit, focused leaf images"),
            (icons::FILE_IMAGE, "File Format", "PNG or JPG files up to 5MB"),
            (icons::LEAF, "Subject Focus", "Single leaf, minimal background clutter"),
        ];
        for (icon, title, detail) in rows {
            ui.horizontal_top(|ui| {
                ui.label(egui::RichText::new(icon).size(18.0).color(theme::ACCENT));
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(title).color(theme::TEXT_PRIMARY).strong());
                    ui.label(
                        egui::RichText::new(detail)
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_MUTED),
                    );
                });
            });
            ui.add_space(theme::SPACING_MD);
        }
    });

    ui.add_space(theme::SPACING_LG);

    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        components::section_heading(ui, icons::PLANT, "Supported Crops");
        egui::Grid::new("supported_crops")
            .num_columns(2)
            .spacing(egui::vec2(theme::SPACING_XL, theme::SPACING_SM))
            .show(ui, |ui| {
                for (i, crop) in SUPPORTED_CROPS.iter().enumerate() {
                    ui.label(
                        egui::RichText::new(format!("{}  {}", icons::CHECK, crop))
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_SECONDARY),
                    );
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted_candidate() -> FileCandidate {
        FileCandidate {
            name: "leaf.png".into(),
            mime: "image/png".into(),
            size: 1024,
            path: None,
            bytes: None,
        }
    }

    #[test]
    fn cannot_process_without_valid_selection() {
        let mut state = UploadState::default();
        assert!(!state.can_process());

        state.selected = Some(accepted_candidate());
        assert!(!state.can_process());

        state.validation = validate_file(&accepted_candidate());
        assert!(state.can_process());

        progress::lock(&state.analysis).status = AnalysisStatus::Processing;
        assert!(!state.can_process());
    }

    #[test]
    fn reset_discards_selection_and_cancels() {
        let mut state = UploadState::default();
        state.selected = Some(accepted_candidate());
        state.validation = validate_file(&accepted_candidate());
        let token = CancellationToken::new();
        state.cancel_token = Some(token.clone());
        {
            let mut a = progress::lock(&state.analysis);
            a.progress = 40;
            a.status = AnalysisStatus::Processing;
        }
        let generation = state.generation;

        state.reset();

        assert!(token.is_cancelled());
        assert!(state.selected.is_none());
        assert_eq!(state.validation, FileValidation::default());
        assert_eq!(state.analysis_snapshot(), (0, AnalysisStatus::Idle));
        assert!(state.generation > generation);
    }

    #[test]
    fn measured_resolution_only_after_decode() {
        let mut state = UploadState::default();
        state.validation = validate_file(&accepted_candidate());
        assert_eq!(state.measured_resolution(), None);

        state.validation = state.validation.with_resolution(800, 600);
        assert_eq!(state.measured_resolution(), Some("800 × 600 px"));

        state.validation.resolution = Some(RESOLUTION_UNAVAILABLE.into());
        assert_eq!(state.measured_resolution(), None);
    }

    #[test]
    fn decodes_in_memory_png() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 200, 30, 255]));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        let bytes: Arc<[u8]> = Arc::from(buf.into_inner());

        let candidate = FileCandidate::from_bytes("leaf.png", "image/png", bytes);
        let decoded = decode_candidate(&candidate).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    fn png_bytes(width: u32, height: u32) -> Arc<[u8]> {
        let img = image::GrayImage::new(width, height);
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        Arc::from(buf.into_inner())
    }

    #[test]
    fn oversized_image_keeps_true_resolution_but_caps_preview() {
        let candidate = FileCandidate::from_bytes("wide.png", "image/png", png_bytes(20_000, 200));
        let mut state = UploadState::default();
        let toast = state.select(candidate.clone());
        assert_eq!(toast.kind, ToastKind::Success);

        let image = decode_for_preview(&candidate, PREVIEW_MAX_SIDE).unwrap();
        let [w, h] = image.preview_size;
        assert!(w <= PREVIEW_MAX_SIDE as usize && h <= PREVIEW_MAX_SIDE as usize);
        assert_eq!(image.rgba.len(), w * h * 4);

        let outcome = DecodeOutcome::Decoded {
            generation: state.generation,
            image,
        };
        assert!(state.apply_decode(outcome).is_some());
        assert_eq!(state.validation.resolution.as_deref(), Some("20000 × 200 px"));
    }

    #[test]
    fn small_image_is_not_resized() {
        let candidate = FileCandidate::from_bytes("leaf.png", "image/png", png_bytes(64, 48));
        let image = decode_for_preview(&candidate, PREVIEW_MAX_SIDE).unwrap();
        assert_eq!((image.width, image.height), (64, 48));
        assert_eq!(image.preview_size, [64, 48]);
    }

    #[test]
    fn accepted_selection_reports_success() {
        let mut state = UploadState::default();
        let toast = state.select(accepted_candidate());

        assert_eq!(toast.title, "File uploaded successfully");
        assert_eq!(toast.description, "Image is ready for analysis");
        assert_eq!(toast.kind, ToastKind::Success);
        assert!(state.selected.is_some());
        assert!(state.validation.is_resolving());
        assert_eq!(DropzoneLook::of(&state), DropzoneLook::Ready);
    }

    #[test]
    fn rejection_clears_previous_selection() {
        let mut state = UploadState::default();
        state.select(accepted_candidate());
        let generation = state.generation;

        let mut gif = accepted_candidate();
        gif.name = "leaf.gif".into();
        gif.mime = "image/gif".into();
        let toast = state.select(gif);

        assert_eq!(toast.title, "Upload failed");
        assert_eq!(toast.description, ERR_UNSUPPORTED_TYPE);
        assert_eq!(toast.kind, ToastKind::Destructive);
        assert!(state.selected.is_none());
        assert!(state.preview.is_none());
        assert!(!state.validation.is_valid);
        assert_eq!(state.validation.error.as_deref(), Some(ERR_UNSUPPORTED_TYPE));
        assert!(state.generation > generation);
        assert_eq!(
            DropzoneLook::of(&state),
            DropzoneLook::Error(ERR_UNSUPPORTED_TYPE.to_string())
        );
    }

    #[test]
    fn oversized_file_reports_size_error() {
        let mut state = UploadState::default();
        let mut big = accepted_candidate();
        big.size = MAX_UPLOAD_BYTES + 1;
        let toast = state.select(big);
        assert_eq!(toast.description, ERR_TOO_LARGE);
        assert_eq!(toast.kind, ToastKind::Destructive);
    }

    #[test]
    fn stale_decode_is_discarded() {
        let mut state = UploadState::default();
        state.select(accepted_candidate());
        let stale_generation = state.generation;
        state.select(accepted_candidate());
        let before = state.validation.clone();

        let stale = DecodeOutcome::Decoded {
            generation: stale_generation,
            image: DecodedImage {
                width: 10,
                height: 10,
                preview_size: [10, 10],
                rgba: vec![0; 400],
            },
        };
        assert!(state.apply_decode(stale).is_none());
        assert_eq!(state.validation, before);

        let failed = DecodeOutcome::Failed {
            generation: stale_generation,
            error: "boom".into(),
        };
        assert!(state.apply_decode(failed).is_none());
        assert_eq!(state.validation, before);
    }

    #[test]
    fn failed_decode_marks_resolution_unavailable() {
        let mut state = UploadState::default();
        state.select(accepted_candidate());
        let failed = DecodeOutcome::Failed {
            generation: state.generation,
            error: "bad header".into(),
        };
        assert!(state.apply_decode(failed).is_none());
        assert!(state.validation.is_valid);
        assert_eq!(state.validation.resolution.as_deref(), Some(RESOLUTION_UNAVAILABLE));
    }

    #[test]
    fn dropzone_look_follows_state() {
        let mut state = UploadState::default();
        assert_eq!(DropzoneLook::of(&state), DropzoneLook::Idle);
        state.drag_active = true;
        assert_eq!(DropzoneLook::of(&state), DropzoneLook::Dragging);
    }

    #[test]
    fn decode_garbage_fails() {
        let bytes: Arc<[u8]> = Arc::from(vec![1u8, 2, 3, 4]);
        let candidate = FileCandidate::from_bytes("leaf.png", "image/png", bytes);
        assert!(matches!(decode_candidate(&candidate), Err(UploadError::Decode(_))));
    }
}
