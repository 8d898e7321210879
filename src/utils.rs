//! Utility functions

use crate::constants::DATA_DIR_NAME;
use std::path::PathBuf;

// Leaf mark used in the navigation bar and as the window icon
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><path fill="#4ade80" d="M54 6C30 6 10 18 10 40c0 6 2 11 5 15l3-3c-2-3-3-7-3-12 0-4 1-8 3-11 4 9 11 16 20 20-3 2-7 3-11 3l-3 3c4 2 8 3 12 3 22 0 32-22 18-52z"/><path fill="none" stroke="#052e16" stroke-width="3" stroke-linecap="round" d="M16 52C26 38 36 26 48 14"/></svg>"##;

/// Rasterize the logo SVG to a square RGBA image of the given size.
pub fn rasterize_logo(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

/// Fit `size` inside `max`, preserving aspect ratio and never upscaling
pub fn fit_size(size: [usize; 2], max: egui::Vec2) -> egui::Vec2 {
    let (w, h) = (size[0] as f32, size[1] as f32);
    if w <= 0.0 || h <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (max.x / w).min(max.y / h).min(1.0);
    egui::vec2(w * scale, h * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_rasterizes() {
        let (pixels, w, h) = rasterize_logo(32).unwrap();
        assert_eq!((w, h), (32, 32));
        assert_eq!(pixels.len(), 32 * 32 * 4);
        assert!(pixels.chunks(4).any(|p| p[3] > 0));
    }

    #[test]
    fn fit_size_preserves_aspect() {
        let fitted = fit_size([1920, 1080], egui::vec2(960.0, 960.0));
        assert_eq!(fitted, egui::vec2(960.0, 540.0));

        let small = fit_size([100, 50], egui::vec2(400.0, 400.0));
        assert_eq!(small, egui::vec2(100.0, 50.0));

        assert_eq!(fit_size([0, 10], egui::vec2(10.0, 10.0)), egui::Vec2::ZERO);
    }
}
