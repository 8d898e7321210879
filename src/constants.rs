//! Application constants and configuration

use std::time::Duration;

pub const APP_NAME: &str = "AgriVision AI";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DATA_DIR_NAME: &str = "AgriVision";
pub const LOG_FILE_NAME: &str = "agrivision.log";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Upload limit: 5 MiB
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// MIME types the validator accepts (exact match)
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

pub const ERR_UNSUPPORTED_TYPE: &str = "Only PNG and JPG files are supported";
pub const ERR_TOO_LARGE: &str = "File size must be less than 5MB";
pub const RESOLUTION_PENDING: &str = "Analyzing...";
pub const RESOLUTION_UNAVAILABLE: &str = "Unavailable";
/// Longest side of the preview texture; larger images are downscaled for display only
pub const PREVIEW_MAX_SIDE: u32 = 2048;

// Progress simulation pacing
pub const PROGRESS_STEP: u8 = 10;
pub const PROGRESS_MAX: u8 = 100;
pub const PROGRESS_STEP_DELAY: Duration = Duration::from_millis(200);
pub const PROGRESS_SETTLE_DELAY: Duration = Duration::from_millis(1000);

// Results zoom
pub const ZOOM_MIN: u32 = 50;
pub const ZOOM_MAX: u32 = 200;
pub const ZOOM_STEP: u32 = 25;
pub const ZOOM_DEFAULT: u32 = 100;

// Toasts
pub const TOAST_VISIBLE_SECS: f32 = 3.0;
pub const TOAST_FADE_SECS: f32 = 0.5;

pub const SUPPORTED_CROPS: [&str; 8] = [
    "Tomato", "Corn", "Wheat", "Soybean", "Potato", "Rice", "Cotton", "Pepper",
];
