use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::question::Question;

/// Delivery settings attached to a subject.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    /// How many questions a student is shown, drawn at random from the bank.
    pub question_count: usize,
    /// Countdown length for one session.
    pub time_limit_minutes: u64,
}

/// A named question bank plus its delivery settings.
///
/// Immutable once created except for full deletion; owned by the remote
/// store and loaded wholesale into memory per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub questions: Vec<Question>,
    pub settings: QuizSettings,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    /// Create a subject from an imported question list.
    ///
    /// `question_count` is clamped to the bank size so the settings always
    /// satisfy `1 <= question_count <= questions.len()`.
    pub fn new(name: impl Into<String>, questions: Vec<Question>, settings: QuizSettings) -> Self {
        let question_count = settings.question_count.min(questions.len()).max(1);
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            questions,
            settings: QuizSettings {
                question_count,
                ..settings
            },
            created_at: Utc::now(),
        }
    }
}
