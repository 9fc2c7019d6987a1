//! Results report export.
//!
//! A pure transform of the (already filtered) result list into a formatted
//! text table, written to a configured output file. No feedback into any
//! other state.

use tracing::debug;

use crate::error::AppResult;
use crate::models::TestResult;

/// Case-insensitive search over student name, group and subject name.
/// An empty term matches everything.
pub fn filter_results(results: &[TestResult], term: &str) -> Vec<TestResult> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return results.to_vec();
    }
    results
        .iter()
        .filter(|r| {
            r.student_name.to_lowercase().contains(&needle)
                || r.group.to_lowercase().contains(&needle)
                || r.subject_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Writes the tabular results report.
pub struct ReportWriter {
    path: String,
}

impl ReportWriter {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Render the report table. Columns: date, student, group, subject,
    /// score fraction, percentage.
    pub fn render(results: &[TestResult]) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<17} {:<24} {:<12} {:<20} {:>9} {:>6}\n",
            "Date", "Student", "Group", "Subject", "Score", "%"
        ));
        out.push_str(&"-".repeat(93));
        out.push('\n');

        for result in results {
            out.push_str(&format!(
                "{:<17} {:<24} {:<12} {:<20} {:>9} {:>5}%\n",
                result.date.format("%Y-%m-%d %H:%M"),
                result.student_name,
                result.group,
                result.subject_name,
                format!("{} / {}", result.score, result.total),
                result.percentage()
            ));
        }

        out
    }

    /// Write the rendered report to the configured file.
    pub async fn write(&self, results: &[TestResult]) -> AppResult<()> {
        let rendered = Self::render(results);
        tokio::fs::write(&self.path, rendered).await?;
        debug!("report with {} rows written to {}", results.len(), self.path);
        Ok(())
    }
}
