//! User settings stored as settings.json in the app data directory

use crate::constants::{SETTINGS_FILE_NAME, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN};
use crate::types::ViewMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Paths
    pub last_browse_dir: Option<String>,

    // Results view
    pub view_mode: ViewMode,
    pub show_overlay: bool,
    pub zoom: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            last_browse_dir: None,
            view_mode: ViewMode::SideBySide,
            show_overlay: true,
            zoom: ZOOM_DEFAULT,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<Settings>(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings.sanitized()
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join(SETTINGS_FILE_NAME);
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Starting directory for the file picker
    pub fn browse_dir_or_default(&self) -> PathBuf {
        self.last_browse_dir
            .as_ref()
            .map(PathBuf::from)
            .filter(|p| p.is_dir())
            .or_else(dirs::picture_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn sanitized(mut self) -> Self {
        self.zoom = self.zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(Settings::load(tmp.path()), Settings::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(SETTINGS_FILE_NAME), "{not json").unwrap();
        assert_eq!(Settings::load(tmp.path()), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings {
            window_w: Some(1280.0),
            window_h: Some(800.0),
            view_mode: ViewMode::Overlay,
            show_overlay: false,
            zoom: 150,
            ..Settings::default()
        };
        settings.save(tmp.path());
        assert_eq!(Settings::load(tmp.path()), settings);
    }

    #[test]
    fn partial_file_fills_defaults_and_clamps_zoom() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(SETTINGS_FILE_NAME), r#"{"zoom": 900}"#).unwrap();
        let settings = Settings::load(tmp.path());
        assert_eq!(settings.zoom, ZOOM_MAX);
        assert!(settings.show_overlay);
        assert_eq!(settings.view_mode, ViewMode::SideBySide);
    }
}
