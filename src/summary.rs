//! Per-site summary records and the aggregated `summary.json`.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::site::SiteInfo;

/// File name of the aggregated summary inside the output directory.
pub const SUMMARY_FILE: &str = "summary.json";

/// Score recorded for a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    /// Two-decimal score string from a successful report, e.g. `"0.88"`
    Measured(String),
    /// Numeric zero written for a failed audit
    Failed(u8),
}

impl Score {
    /// Ties round away from zero, so 0.125 becomes "0.13".
    pub fn measured(value: f64) -> Self {
        Score::Measured(format!("{:.2}", (value * 100.0).round() / 100.0))
    }

    pub fn failed() -> Self {
        Score::Failed(0)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Score::Measured(s) => write!(f, "{}", s),
            Score::Failed(n) => write!(f, "{}", n),
        }
    }
}

/// Outcome of auditing one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSummary {
    #[serde(flatten)]
    pub site: SiteInfo,
    pub score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SiteSummary {
    pub fn succeeded(site: SiteInfo, score: f64) -> Self {
        Self {
            site,
            score: Score::measured(score),
            error: None,
        }
    }

    pub fn failed(site: SiteInfo, error: impl Into<String>) -> Self {
        Self {
            site,
            score: Score::failed(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Read a Lighthouse JSON report and extract its overall score.
pub fn read_report_score(path: &Path) -> Result<f64> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;
    let report: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse report: {}", path.display()))?;

    report_score(&report)
        .with_context(|| format!("Report has no score: {}", path.display()))
}

/// Top-level `score` when present, otherwise the mean of the category scores.
pub fn report_score(report: &Value) -> Option<f64> {
    if let Some(score) = report.get("score").and_then(Value::as_f64) {
        return Some(score);
    }

    let scores: Vec<f64> = report
        .get("categories")?
        .as_object()?
        .values()
        .filter_map(|c| c.get("score").and_then(Value::as_f64))
        .collect();

    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// Write the summaries as compact UTF-8 JSON.
pub fn write_summary(path: &Path, summaries: &[SiteSummary]) -> Result<()> {
    let json = serde_json::to_string(summaries)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write summary: {}", path.display()))
}

/// Print a per-site result table to stdout
pub fn print_summary(summaries: &[SiteSummary]) {
    let failed = summaries.iter().filter(|s| s.is_error()).count();
    let succeeded = summaries.len() - failed;

    println!("\n{}", "=".repeat(60).dimmed());
    println!("{}", "LIGHTHOUSE RESULTS".green().bold());
    println!("{}", "=".repeat(60).dimmed());

    for summary in summaries {
        match &summary.error {
            None => println!(
                "  {} {:<44} {}",
                "+".green(),
                summary.site.url,
                summary.score.to_string().bold()
            ),
            Some(err) => println!(
                "  {} {:<44} {}",
                "!".red(),
                summary.site.url,
                first_line(err).red()
            ),
        }
    }

    println!(
        "\n  {} succeeded, {} failed",
        succeeded.to_string().green(),
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().normal()
        }
    );
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn site() -> SiteInfo {
        SiteInfo::new("example.com", false)
    }

    #[test]
    fn score_formats_two_decimals() {
        assert_eq!(Score::measured(0.876), Score::Measured("0.88".to_string()));
        assert_eq!(Score::measured(1.0).to_string(), "1.00");
        assert_eq!(Score::measured(0.0).to_string(), "0.00");
    }

    #[test]
    fn score_ties_round_up() {
        assert_eq!(Score::measured(0.125).to_string(), "0.13");
        assert_eq!(Score::measured(0.625).to_string(), "0.63");
        assert_eq!(Score::measured(0.375).to_string(), "0.38");
    }

    #[test]
    fn category_mean_tie_rounds_up() {
        let report = json!({
            "categories": {
                "performance": {"score": 0.0},
                "accessibility": {"score": 0.25}
            }
        });
        let score = Score::measured(report_score(&report).unwrap());
        assert_eq!(score, Score::Measured("0.13".to_string()));
    }

    #[test]
    fn success_record_shape() {
        let summary = SiteSummary::succeeded(site(), 0.91);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({
                "url": "https://example.com",
                "name": "example_com",
                "file": "example_com.report.json",
                "score": "0.91"
            })
        );
    }

    #[test]
    fn failure_record_shape() {
        let summary = SiteSummary::failed(site(), "network error");
        assert!(summary.is_error());
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["score"], json!(0));
        assert_eq!(value["error"], json!("network error"));
    }

    #[test]
    fn summary_reads_back() {
        let summaries = vec![
            SiteSummary::succeeded(site(), 0.5),
            SiteSummary::failed(SiteInfo::new("b.io", false), "boom"),
        ];
        let json = serde_json::to_string(&summaries).unwrap();
        let parsed: Vec<SiteSummary> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summaries);
    }

    #[test]
    fn report_score_top_level() {
        assert_eq!(report_score(&json!({"score": 0.73})), Some(0.73));
    }

    #[test]
    fn report_score_category_mean() {
        let report = json!({
            "categories": {
                "performance": {"score": 0.5},
                "accessibility": {"score": 1.0},
                "seo": {"score": null}
            }
        });
        assert_eq!(report_score(&report), Some(0.75));
    }

    #[test]
    fn report_score_missing() {
        assert_eq!(report_score(&json!({"audits": {}})), None);
        assert_eq!(report_score(&json!({"categories": {}})), None);
    }

    #[test]
    fn read_report_score_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.report.json");
        fs::write(&path, r#"{"score": 0.42}"#).unwrap();
        assert_eq!(read_report_score(&path).unwrap(), 0.42);
    }

    #[test]
    fn read_report_score_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_report_score(&dir.path().join("missing.json")).is_err());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "not json").unwrap();
        let err = read_report_score(&bad).unwrap_err();
        assert!(err.to_string().contains("Failed to parse report"));
    }

    #[test]
    fn write_summary_compact_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SUMMARY_FILE);
        write_summary(&path, &[SiteSummary::succeeded(site(), 0.9)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains('\n'));
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }
}
