//! Common types and data structures

use serde::{Deserialize, Serialize};

/// Top-level screens reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Upload,
    Results,
}

impl Screen {
    pub const NAV: [Screen; 3] = [Screen::Landing, Screen::Upload, Screen::Results];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Landing => "Home",
            Screen::Upload => "Analyze",
            Screen::Results => "Results",
        }
    }
}

/// Lifecycle of the simulated analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    Idle,
    Processing,
    Complete,
    Cancelled,
}

/// State shared between the UI and the progress simulation task
#[derive(Debug)]
pub struct AnalysisState {
    pub progress: u8,
    pub status: AnalysisStatus,
    /// Set once when the simulation completes; cleared by the UI when it shows the notice
    pub notice_pending: bool,
}

impl Default for AnalysisState {
    fn default() -> Self {
        Self {
            progress: 0,
            status: AnalysisStatus::Idle,
            notice_pending: false,
        }
    }
}

impl AnalysisState {
    pub fn is_processing(&self) -> bool {
        self.status == AnalysisStatus::Processing
    }

    pub fn take_notice(&mut self) -> bool {
        std::mem::take(&mut self.notice_pending)
    }
}

/// Visual analysis layout on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    SideBySide,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Destructive,
}

/// Transient notification shown bottom-right
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub kind: ToastKind,
    pub start: std::time::Instant,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind,
            start: std::time::Instant::now(),
        }
    }
}
