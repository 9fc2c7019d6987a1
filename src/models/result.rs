use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Student identity captured at login. No authentication, just form capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub group: String,
}

/// One finished quiz attempt.
///
/// Created exactly once when a session finishes, never mutated afterwards.
/// `subject_name` is denormalized on purpose: results must survive subject
/// deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: String,
    pub student_name: String,
    pub group: String,
    pub subject_name: String,
    pub score: usize,
    /// Number of questions presented in the session (not the bank size).
    pub total: usize,
    pub date: DateTime<Utc>,
}

impl TestResult {
    pub fn new(
        student: &Student,
        subject_name: impl Into<String>,
        score: usize,
        total: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            student_name: student.name.clone(),
            group: student.group.clone(),
            subject_name: subject_name.into(),
            score,
            total,
            date: Utc::now(),
        }
    }

    /// Rounded percentage for display and reports.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.score as f64 / self.total as f64) * 100.0).round() as u32
    }
}
