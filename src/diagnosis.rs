//! Mock diagnosis shown on the results screen, plus export helpers

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize diagnosis: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(confidence: f32) -> Self {
        if confidence >= 0.9 {
            Self::High
        } else if confidence >= 0.7 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Moderate,
    High,
    Unknown,
}

impl Severity {
    pub fn parse(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "low" => Self::Low,
            "moderate" => Self::Moderate,
            "high" => Self::High,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisMetadata {
    pub analysis_time: String,
    pub model_version: String,
    pub date: String,
    pub resolution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub disease_class: String,
    pub pathogen: String,
    pub confidence: f32,
    pub affected_area: f32,
    pub severity: String,
    pub treatment: Vec<String>,
    pub metadata: DiagnosisMetadata,
}

impl Diagnosis {
    /// The fixed sample result. `resolution` overrides the sample image size when
    /// an uploaded image has been measured.
    pub fn sample(resolution: Option<&str>) -> Self {
        Self {
            disease_class: "Tomato Early Blight".into(),
            pathogen: "Alternaria solani".into(),
            confidence: 0.92,
            affected_area: 0.34,
            severity: "Moderate".into(),
            treatment: vec![
                "Remove infected leaves immediately".into(),
                "Apply copper-based fungicide spray".into(),
                "Improve air circulation around plants".into(),
                "Reduce watering frequency".into(),
                "Monitor weekly for progression".into(),
            ],
            metadata: DiagnosisMetadata {
                analysis_time: "2.1s".into(),
                model_version: "AgriVision-CNN-v2.3".into(),
                date: chrono::Local::now().format("%x").to_string(),
                resolution: resolution.unwrap_or("1920 × 1080 px").to_string(),
            },
        }
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence)
    }

    pub fn severity_level(&self) -> Severity {
        Severity::parse(&self.severity)
    }

    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }

    pub fn affected_percent(&self) -> String {
        format!("{:.1}%", self.affected_area * 100.0)
    }

    pub fn to_report(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} - Diagnostic Report\n", APP_NAME));
        out.push_str(&format!("Generated {}\n\n", self.metadata.date));
        out.push_str(&format!("Disease:        {}\n", self.disease_class));
        out.push_str(&format!("Pathogen:       {}\n", self.pathogen));
        out.push_str(&format!("Confidence:     {}\n", self.confidence_percent()));
        out.push_str(&format!("Affected area:  {}\n", self.affected_percent()));
        out.push_str(&format!("Severity:       {}\n\n", self.severity));
        out.push_str("Treatment recommendations\n");
        for (i, step) in self.treatment.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, step));
        }
        out.push_str("\nAnalysis metadata\n");
        out.push_str(&format!("  Processing time: {}\n", self.metadata.analysis_time));
        out.push_str(&format!("  Model version:   {}\n", self.metadata.model_version));
        out.push_str(&format!("  Resolution:      {}\n", self.metadata.resolution));
        out
    }

    pub fn export_json(&self, path: &Path) -> Result<(), ExportError> {
        let json = serde_json::to_string_pretty(self)?;
        write_file(path, &json)?;
        info!(path = %path.display(), "Diagnosis exported as JSON");
        Ok(())
    }

    pub fn export_report(&self, path: &Path) -> Result<(), ExportError> {
        write_file(path, &self.to_report())?;
        info!(path = %path.display(), "Diagnostic report written");
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Next zoom level, clamped to the allowed range
pub fn zoom_in(zoom: u32) -> u32 {
    (zoom + ZOOM_STEP).min(ZOOM_MAX)
}

pub fn zoom_out(zoom: u32) -> u32 {
    zoom.saturating_sub(ZOOM_STEP).max(ZOOM_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(0.92), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.9), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.89), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.7), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.69), ConfidenceLevel::Low);
    }

    #[test]
    fn severity_is_case_insensitive() {
        assert_eq!(Severity::parse("Moderate"), Severity::Moderate);
        assert_eq!(Severity::parse("LOW"), Severity::Low);
        assert_eq!(Severity::parse("high"), Severity::High);
        assert_eq!(Severity::parse("critical"), Severity::Unknown);
    }

    #[test]
    fn zoom_is_clamped() {
        assert_eq!(zoom_in(ZOOM_DEFAULT), 125);
        assert_eq!(zoom_in(200), 200);
        assert_eq!(zoom_in(190), 200);
        assert_eq!(zoom_out(ZOOM_DEFAULT), 75);
        assert_eq!(zoom_out(50), 50);
        assert_eq!(zoom_out(10), 50);
    }

    #[test]
    fn sample_values() {
        let d = Diagnosis::sample(None);
        assert_eq!(d.disease_class, "Tomato Early Blight");
        assert_eq!(d.confidence_percent(), "92.0%");
        assert_eq!(d.affected_percent(), "34.0%");
        assert_eq!(d.severity_level(), Severity::Moderate);
        assert_eq!(d.confidence_level(), ConfidenceLevel::High);
        assert_eq!(d.treatment.len(), 5);
        assert_eq!(d.metadata.resolution, "1920 × 1080 px");

        let d = Diagnosis::sample(Some("640 × 480 px"));
        assert_eq!(d.metadata.resolution, "640 × 480 px");
    }

    #[test]
    fn export_json_and_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let d = Diagnosis::sample(None);

        let json_path = dir.path().join("diagnosis.json");
        d.export_json(&json_path).unwrap();
        let parsed: Diagnosis =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed, d);

        let report_path = dir.path().join("report.txt");
        d.export_report(&report_path).unwrap();
        let report = std::fs::read_to_string(&report_path).unwrap();
        assert!(report.contains("Tomato Early Blight"));
        assert!(report.contains("  5. Monitor weekly for progression"));
    }

    #[test]
    fn export_to_missing_dir_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Diagnosis::sample(None)
            .export_json(&dir.path().join("nope").join("d.json"))
            .unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
