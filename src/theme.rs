//! Centralized theme constants for AgriVision
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x0c, 0x0f, 0x0d);
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x15, 0x1a, 0x17);
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x22, 0x29, 0x25);
pub const BG_HOVER: Color32 = Color32::from_rgb(0x13, 0x22, 0x19);
pub const BG_DROPZONE: Color32 = Color32::from_rgb(0x10, 0x15, 0x12);

// =============================================================================
// COLORS - Accent (Leaf green)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80); // green-400
pub const ACCENT_DARK: Color32 = Color32::from_rgb(0x05, 0x2e, 0x16); // green-950
pub const ACCENT_MUTED: Color32 = Color32::from_rgb(0x16, 0x65, 0x34); // green-800

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe7);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa);
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a);

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x27, 0x2f, 0x2a);
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x46, 0x42);

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99); // emerald-400
pub const STATUS_WARNING: Color32 = Color32::from_rgb(0xfb, 0xbf, 0x24); // amber-400
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// Mock lesion overlay
pub const OVERLAY_LESION: Color32 = Color32::from_rgba_premultiplied(0x8a, 0x2a, 0x1c, 0x8c);

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x2f, 0x37, 0x33);
pub const BTN_ACCENT: Color32 = ACCENT;
pub const BTN_DANGER: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26); // red-600

// Toggle
pub const TOGGLE_SELECTED: Color32 = ACCENT_MUTED;
pub const TOGGLE_UNSELECTED: Color32 = BG_SURFACE;

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_HERO: f32 = 40.0;
pub const FONT_DISPLAY: f32 = 28.0;
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const NAV_HEIGHT: f32 = 56.0;
pub const CONTENT_MAX_WIDTH: f32 = 1120.0;
pub const BUTTON_HEIGHT: f32 = 28.0;
pub const BUTTON_HEIGHT_LARGE: f32 = 40.0;
pub const PROGRESS_HEIGHT: f32 = 8.0;
pub const DROPZONE_HEIGHT: f32 = 220.0;
pub const PREVIEW_HEIGHT: f32 = 260.0;
pub const ANALYSIS_IMG_HEIGHT: f32 = 280.0;

pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_MEDIUM: f32 = 6.0;
pub const RADIUS_LARGE: f32 = 8.0;

pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MEDIUM: f32 = 1.5;
pub const STROKE_THICK: f32 = 2.0;

pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;
pub const SPACING_SECTION: f32 = 32.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: BG_ELEVATED,
        extreme_bg_color: BG_BASE,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT,
        selection: egui::style::Selection {
            bg_fill: ACCENT_MUTED,
            stroke: egui::Stroke::NONE,
        },
        widgets: egui::style::Widgets {
            noninteractive: egui::style::WidgetVisuals {
                bg_fill: BG_ELEVATED,
                weak_bg_fill: BG_SURFACE,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            inactive: egui::style::WidgetVisuals {
                bg_fill: Color32::TRANSPARENT,
                weak_bg_fill: BG_ELEVATED,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            hovered: egui::style::WidgetVisuals {
                bg_fill: BG_HOVER,
                weak_bg_fill: Color32::from_rgb(0x2c, 0x35, 0x30),
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_MEDIUM, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            active: egui::style::WidgetVisuals {
                bg_fill: Color32::from_rgb(0x26, 0x30, 0x2a),
                weak_bg_fill: Color32::from_rgb(0x26, 0x30, 0x2a),
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: -2.0,
            },
            open: egui::style::WidgetVisuals {
                bg_fill: BG_SURFACE,
                weak_bg_fill: BG_ELEVATED,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
        },
        striped: false,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_corner_radius: egui::CornerRadius::same(8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.scroll.bar_width = 6.0;
        style.spacing.scroll.floating = false;
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_XL as i8))
}

pub fn section_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_DROPZONE)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(12))
}

pub fn nav_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_BASE)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .inner_margin(egui::Margin::symmetric(24, 0))
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Default outlined button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BTN_DEFAULT)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT))
        .corner_radius(RADIUS_DEFAULT)
}

/// Accent green button (for primary actions like Process Image)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(ACCENT_DARK).strong())
        .fill(BTN_ACCENT)
        .corner_radius(RADIUS_DEFAULT)
}

/// Danger red button (for destructive actions like Reset)
pub fn button_danger(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_PRIMARY))
        .fill(BTN_DANGER)
        .corner_radius(RADIUS_DEFAULT)
}

/// Text color + translucent fill for a status color (badges)
pub fn badge_colors(color: Color32) -> (Color32, Color32) {
    (
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 26),
        color,
    )
}

// =============================================================================
// HELPER - Segmented toggle (pill-style)
// =============================================================================

/// Renders a segmented toggle with two options. Returns true if selection changed.
/// `left_active` indicates if the left option is currently selected.
pub fn segmented_toggle(
    ui: &mut egui::Ui,
    left_label: &str,
    right_label: &str,
    left_active: &mut bool,
) -> bool {
    let mut changed = false;
    let height = 28.0;
    let font_size = 12.0;
    let rounding = 5.0;
    let segment_width = 96.0;

    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(segment_width * 2.0, height), egui::Sense::click());
    let painter = ui.painter();

    painter.rect_filled(rect, rounding, TOGGLE_UNSELECTED);

    let left_rect =
        egui::Rect::from_min_max(rect.min, egui::pos2(rect.min.x + segment_width, rect.max.y));
    let right_rect =
        egui::Rect::from_min_max(egui::pos2(rect.min.x + segment_width, rect.min.y), rect.max);
    let active_rect = if *left_active { left_rect } else { right_rect };

    painter.rect_filled(active_rect.shrink(2.0), rounding - 1.0, TOGGLE_SELECTED);

    let (left_color, right_color) = if *left_active {
        (TEXT_PRIMARY, TEXT_MUTED)
    } else {
        (TEXT_MUTED, TEXT_PRIMARY)
    };
    painter.text(
        left_rect.center(),
        egui::Align2::CENTER_CENTER,
        left_label,
        egui::FontId::proportional(font_size),
        left_color,
    );
    painter.text(
        right_rect.center(),
        egui::Align2::CENTER_CENTER,
        right_label,
        egui::FontId::proportional(font_size),
        right_color,
    );

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let clicked_left = pos.x < rect.min.x + segment_width;
            if clicked_left != *left_active {
                *left_active = clicked_left;
                changed = true;
            }
        }
    }
    changed
}
