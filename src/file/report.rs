// src/file/report.rs

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Result, Context};
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use csv::Writer;
use tracing::info;

use super::{FileHandler, pretty_ron};
use crate::analysis::AnalysisResult;
use crate::state::CompletedAnalysis;
use crate::utils::rounded_percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Ron,
    Csv,
}

impl ReportFormat {
    /// `.csv` paths get CSV, everything else RON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ReportFormat::Csv,
            _ => ReportFormat::Ron,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    #[serde(default)]
    pub image: Option<PathBuf>,
    pub result: AnalysisResult,
}

impl AnalysisReport {
    pub fn from_completed(completed: &CompletedAnalysis) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            source: completed.payload.describe(),
            image: completed.payload.image_path().cloned(),
            result: completed.result.clone(),
        }
    }

    fn csv_rows(&self) -> Vec<(String, String)> {
        let result = &self.result;
        let mut rows = vec![
            ("submission_id".to_string(), result.submission_id.clone()),
            ("source".to_string(), self.source.clone()),
            ("verdict".to_string(), result.verdict.to_string()),
            ("confidence".to_string(), format!("{}%", rounded_percent(result.confidence))),
            ("detected_logo".to_string(), result.detected_logo.clone().unwrap_or_default()),
            ("suspicious_price".to_string(), result.suspicious_price.to_string()),
            (
                "fake_review_probability".to_string(),
                format!("{}%", rounded_percent(result.fake_review_probability)),
            ),
            ("completed_at".to_string(), result.completed_at.to_rfc3339()),
        ];
        if let Some(image) = &self.image {
            rows.push(("image".to_string(), image.display().to_string()));
        }
        rows.extend(result.details.iter().map(|d| ("detail".to_string(), d.clone())));
        rows
    }
}

#[derive(Debug, Default)]
pub struct ReportFileHandler;

impl ReportFileHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, report: &AnalysisReport, path: &Path) -> Result<ReportFormat> {
        let format = ReportFormat::from_path(path);
        match format {
            ReportFormat::Ron => self.save(report, path)?,
            ReportFormat::Csv => self.save_csv(report, path)?,
        }
        info!(path = %path.display(), ?format, "report exported");
        Ok(format)
    }

    fn save_csv(&self, report: &AnalysisReport, path: &Path) -> Result<()> {
        let mut writer = Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        writer.write_record(["field", "value"])?;
        for (field, value) in report.csv_rows() {
            writer.write_record([field.as_str(), value.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl FileHandler<AnalysisReport> for ReportFileHandler {
    #[cfg(test)]
    fn load(&self, path: &Path) -> Result<AnalysisReport> {
        if ReportFormat::from_path(path) == ReportFormat::Csv {
            return Err(anyhow::anyhow!("CSV reports are export-only: {}", path.display()));
        }
        let content = fs::read_to_string(path)?;
        ron::from_str(&content).context("Failed to parse report file")
    }

    fn save(&self, data: &AnalysisReport, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(data, pretty_ron())?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Verdict;
    use crate::analysis::result::DETAIL_STEPS;
    use crate::input::{ImageAttachment, SubmissionPayload};

    fn completed() -> CompletedAnalysis {
        CompletedAnalysis {
            payload: SubmissionPayload::Url { url: "https://shop.example.com/item/42".to_string() },
            result: AnalysisResult {
                submission_id: "sub-1".to_string(),
                detected_logo: None,
                suspicious_price: true,
                fake_review_probability: 71.6,
                verdict: Verdict::Counterfeit,
                confidence: 83.2,
                details: DETAIL_STEPS.iter().map(|s| s.to_string()).collect(),
                completed_at: Utc::now(),
            },
        }
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ReportFormat::from_path(Path::new("r.CSV")), ReportFormat::Csv);
        assert_eq!(ReportFormat::from_path(Path::new("r.ron")), ReportFormat::Ron);
        assert_eq!(ReportFormat::from_path(Path::new("report")), ReportFormat::Ron);
    }

    #[test]
    fn ron_export_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.ron");
        let report = AnalysisReport::from_completed(&completed());

        let handler = ReportFileHandler::new();
        assert_eq!(handler.export(&report, &path).unwrap(), ReportFormat::Ron);
        let loaded = handler.load(&path).unwrap();
        assert_eq!(loaded.result, report.result);
        assert_eq!(loaded.source, "Product link: https://shop.example.com/item/42");
    }

    #[test]
    fn csv_export_lists_fields_and_details() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let report = AnalysisReport::from_completed(&completed());

        let handler = ReportFileHandler::new();
        assert_eq!(handler.export(&report, &path).unwrap(), ReportFormat::Csv);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<(String, String)> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].to_string(), r[1].to_string())
            })
            .collect();

        assert!(rows.contains(&("verdict".to_string(), "counterfeit".to_string())));
        assert!(rows.contains(&("confidence".to_string(), "83%".to_string())));
        assert!(rows.contains(&("fake_review_probability".to_string(), "72%".to_string())));
        assert_eq!(rows.iter().filter(|(f, _)| f == "detail").count(), 4);
        assert!(handler.load(&path).is_err());
    }

    #[test]
    fn manual_report_records_attached_image() {
        let mut analysis = completed();
        analysis.payload = SubmissionPayload::Manual {
            product_name: "Air Max".to_string(),
            price: "89.99".to_string(),
            reviews: String::new(),
            image: Some(ImageAttachment {
                path: PathBuf::from("/tmp/shoe.png"),
                file_name: "shoe.png".to_string(),
                size_bytes: 2048,
            }),
        };
        let report = AnalysisReport::from_completed(&analysis);
        assert_eq!(report.image, Some(PathBuf::from("/tmp/shoe.png")));
        assert!(report.csv_rows().contains(&("image".to_string(), "/tmp/shoe.png".to_string())));

        let url_report = AnalysisReport::from_completed(&completed());
        assert!(url_report.image.is_none());
        assert!(url_report.csv_rows().iter().all(|(field, _)| field != "image"));
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.ron");
        let report = AnalysisReport::from_completed(&completed());
        assert!(ReportFileHandler::new().export(&report, &path).is_err());
    }
}
