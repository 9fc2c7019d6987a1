//! Navigation state and form validation.
//!
//! The current screen is an explicit value owned by the orchestrator and
//! changed only through its transition methods; no ambient view state.
//! Form checks live here because they gate those transitions: a failed
//! validation blocks locally and never reaches the remote store.

use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{QuizSettings, Student};

/// Which screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Landing,
    AdminLogin,
    AdminDashboard,
    AdminResults,
    StudentLogin,
    StudentSubjects,
    StudentQuiz,
    StudentResult,
}

/// Validate the student login form.
pub fn validate_student_login(name: &str, group: &str) -> AppResult<Student> {
    let name = name.trim();
    let group = group.trim();
    if name.is_empty() {
        return Err(AppError::missing_field("student name"));
    }
    if group.is_empty() {
        return Err(AppError::missing_field("group"));
    }
    Ok(Student {
        name: name.to_string(),
        group: group.to_string(),
    })
}

/// Validate the subject creation form against the imported bank size.
pub fn validate_subject_form(
    name: &str,
    question_count: usize,
    time_limit_minutes: u64,
    bank_size: usize,
) -> AppResult<QuizSettings> {
    if name.trim().is_empty() {
        return Err(AppError::missing_field("subject name"));
    }
    if bank_size == 0 {
        return Err(AppError::missing_field("questions"));
    }
    if question_count < 1 || question_count > bank_size {
        return Err(AppError::Validation(ValidationError::OutOfRange {
            field: "question count",
            value: question_count,
            min: 1,
            max: bank_size,
        }));
    }
    if time_limit_minutes < 1 {
        return Err(AppError::Validation(ValidationError::OutOfRange {
            field: "time limit (minutes)",
            value: time_limit_minutes as usize,
            min: 1,
            max: usize::MAX,
        }));
    }
    Ok(QuizSettings {
        question_count,
        time_limit_minutes,
    })
}
