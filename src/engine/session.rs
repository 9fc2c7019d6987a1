//! The exam session state machine.
//!
//! One session is exclusively owned by one student's run; there is no
//! cross-session state. The countdown is driven externally through
//! [`QuizSession::tick`], so a periodic timer and a manual finish can race
//! only at the idempotent terminal guard in [`QuizSession::finish`]:
//! whichever reaches it first performs the scoring, the other becomes a
//! no-op.

use std::collections::HashMap;

use tracing::info;

use crate::engine::randomizer;
use crate::models::{Question, Student, Subject, TestResult};

/// Session lifecycle. `Loading` only exists while the randomized question
/// set is being produced; `Finished` is terminal and entered exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    InProgress,
    Finished,
}

/// A single student's quiz attempt over a snapshot of randomized questions.
#[derive(Debug)]
pub struct QuizSession {
    subject_name: String,
    student: Student,
    questions: Vec<Question>,
    /// Sparse answer map: unanswered questions have no entry.
    answers: HashMap<String, usize>,
    current: usize,
    remaining_secs: u64,
    state: SessionState,
}

impl QuizSession {
    /// Start a session for `student` on `subject`: draw the randomized
    /// sample and arm the countdown.
    ///
    /// Asynchronous to keep the scheduling model uniform with the other
    /// suspension points (import, store I/O); the draw itself is CPU-only.
    pub async fn begin(subject: &Subject, student: Student) -> Self {
        let mut session = Self {
            subject_name: subject.name.clone(),
            student,
            questions: Vec::new(),
            answers: HashMap::new(),
            current: 0,
            remaining_secs: subject.settings.time_limit_minutes * 60,
            state: SessionState::Loading,
        };

        session.questions =
            randomizer::draw(&subject.questions, subject.settings.question_count);
        session.state = SessionState::InProgress;

        info!(
            "session started: {} questions from '{}', {} seconds",
            session.questions.len(),
            session.subject_name,
            session.remaining_secs
        );
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// The recorded answer for a question, if any.
    pub fn answer_for(&self, question_id: &str) -> Option<usize> {
        self.answers.get(question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Record (or overwrite) an answer. Ignored outside `InProgress`.
    /// Does not advance the position.
    pub fn select_answer(&mut self, question_id: &str, option_index: usize) {
        if self.state != SessionState::InProgress {
            return;
        }
        self.answers.insert(question_id.to_string(), option_index);
    }

    /// Jump to a question; out-of-range indexes clamp to the valid range.
    /// Purely navigational.
    pub fn go_to(&mut self, index: usize) {
        if self.questions.is_empty() {
            return;
        }
        self.current = index.min(self.questions.len() - 1);
    }

    pub fn next(&mut self) {
        self.go_to(self.current.saturating_add(1));
    }

    pub fn previous(&mut self) {
        self.go_to(self.current.saturating_sub(1));
    }

    /// One countdown step. At zero the session finishes automatically and
    /// the result (if this tick produced it) is returned.
    pub fn tick(&mut self) -> Option<TestResult> {
        if self.state != SessionState::InProgress {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return self.finish();
        }
        None
    }

    /// Complete the session and score it.
    ///
    /// Terminal guard: only the first call (manual or timer-driven)
    /// produces a `TestResult`; every later call is a no-op returning
    /// `None`.
    pub fn finish(&mut self) -> Option<TestResult> {
        if self.state == SessionState::Finished {
            return None;
        }
        self.state = SessionState::Finished;

        let score = self
            .questions
            .iter()
            .filter(|q| self.answers.get(&q.id) == Some(&q.correct_index))
            .count();
        let total = self.questions.len();

        info!(
            "session finished: {}/{} for {} ({})",
            score, total, self.student.name, self.student.group
        );

        Some(TestResult::new(
            &self.student,
            self.subject_name.clone(),
            score,
            total,
        ))
    }

    /// Abandon the session without producing a result. Honored only before
    /// `Finished` and only with explicit confirmation; returns whether the
    /// cancellation took effect.
    pub fn cancel(&mut self, confirmed: bool) -> bool {
        if self.state == SessionState::Finished || !confirmed {
            return false;
        }
        self.state = SessionState::Finished;
        info!("session cancelled by {}", self.student.name);
        true
    }
}
