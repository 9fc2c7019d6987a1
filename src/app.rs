//! Application orchestrator.
//!
//! Owns the in-memory subject and result lists, the explicit navigation
//! state, and the remote store handle. Two responsibilities:
//!
//! - the interactive flows (admin subject management, student quiz run),
//!   with optimistic local fallback whenever the store misbehaves;
//! - the batch import pipeline ([`App::run`]): scan a folder of `.docx`
//!   documents and publish each one as a subject.
//!
//! Persistence failures are recovered here and never crash a flow; import
//! failures abort only the affected document.

use std::path::Path;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::clients::{ObjectStore, StoreClient};
use crate::config::Config;
use crate::engine::QuizSession;
use crate::error::{AppError, AppResult};
use crate::importer;
use crate::models::{Question, Student, Subject, TestResult};
use crate::services::{filter_results, ReportWriter};
use crate::view::{self, AppView};

/// Application state and orchestration, generic over the store seam.
pub struct App<S = StoreClient> {
    config: Config,
    store: S,
    subjects: Vec<Subject>,
    results: Vec<TestResult>,
    view: AppView,
    current_student: Option<Student>,
    last_result: Option<TestResult>,
    last_result_saved: bool,
}

impl App<StoreClient> {
    /// Initialize against the configured remote store.
    pub async fn initialize(config: Config) -> Result<Self> {
        let store = StoreClient::new(&config);
        Ok(Self::with_store(config, store).await)
    }
}

impl<S: ObjectStore> App<S> {
    /// Initialize with an explicit store implementation.
    ///
    /// A failing fetch degrades to empty local lists; the store being
    /// down must never prevent startup.
    pub async fn with_store(config: Config, store: S) -> Self {
        let subjects = match store.list_subjects().await {
            Ok(subjects) => subjects,
            Err(e) => {
                warn!("could not load subjects, starting empty: {}", e);
                Vec::new()
            }
        };
        let results = match store.list_results().await {
            Ok(results) => results,
            Err(e) => {
                warn!("could not load results, starting empty: {}", e);
                Vec::new()
            }
        };

        info!(
            "loaded {} subjects and {} results",
            subjects.len(),
            results.len()
        );

        Self {
            config,
            store,
            subjects,
            results,
            view: AppView::Landing,
            current_student: None,
            last_result: None,
            last_result_saved: false,
        }
    }

    // ========== Batch import pipeline ==========

    /// Scan the configured folder and publish every `.docx` in it as a
    /// subject. Sequential on purpose: one import pass at a time.
    pub async fn run(&mut self) -> Result<()> {
        log_startup(&self.config);

        let mut entries = tokio::fs::read_dir(&self.config.docx_folder).await?;
        let mut stats = ImportStats::default();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("docx") {
                continue;
            }
            stats.total += 1;

            match self.import_document(&path).await {
                Ok(subject) => {
                    info!(
                        "✓ '{}': {} questions imported",
                        subject.name,
                        subject.questions.len()
                    );
                    stats.success += 1;
                }
                Err(e) if e.is_empty_import() => {
                    warn!(
                        "⚠️ {}: no questions recognized, check the table layout",
                        path.display()
                    );
                    stats.failed += 1;
                }
                Err(e) => {
                    error!("❌ {}: {}", path.display(), e);
                    stats.failed += 1;
                }
            }
        }

        if stats.total == 0 {
            warn!("⚠️ no .docx documents found in {}", self.config.docx_folder);
            return Ok(());
        }

        log_final_stats(&stats);
        Ok(())
    }

    /// Parse one document and publish it as a subject named after the file.
    async fn import_document(&mut self, path: &Path) -> AppResult<&Subject> {
        let bytes = tokio::fs::read(path).await?;
        let questions = importer::parse(&bytes)?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string();

        // The configured default sample size may exceed a small bank.
        let question_count = self.config.default_question_count.min(questions.len()).max(1);
        self.create_subject(
            &name,
            questions,
            question_count,
            self.config.default_time_limit_minutes,
        )
        .await
    }

    // ========== Admin flows ==========

    /// Validate the subject form, then insert. When the store rejects the
    /// insert, the subject is kept locally anyway (optimistic fallback)
    /// with a warning that the saved copy may be absent.
    pub async fn create_subject(
        &mut self,
        name: &str,
        questions: Vec<Question>,
        question_count: usize,
        time_limit_minutes: u64,
    ) -> AppResult<&Subject> {
        let settings =
            view::validate_subject_form(name, question_count, time_limit_minutes, questions.len())?;

        let subject = Subject::new(name.trim(), questions, settings);

        let stored = match self.store.insert_subject(&subject).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("subject '{}' kept locally only: {}", subject.name, e);
                subject
            }
        };

        self.subjects.insert(0, stored);
        Ok(&self.subjects[0])
    }

    /// Delete a subject. The local list is updated even when the remote
    /// delete fails.
    pub async fn delete_subject(&mut self, id: &str) {
        if let Err(e) = self.store.delete_subject(id).await {
            warn!("remote delete of subject {} failed: {}", id, e);
        }
        self.subjects.retain(|s| s.id != id);
    }

    /// Export the (filtered) results report to the configured file.
    pub async fn export_report(&self, search_term: &str) -> AppResult<()> {
        let filtered = filter_results(&self.results, search_term);
        ReportWriter::new(&self.config.report_file)
            .write(&filtered)
            .await
    }

    // ========== Student flows ==========

    /// Student login: validates the form and moves to the subject list.
    pub fn student_login(&mut self, name: &str, group: &str) -> AppResult<()> {
        let student = view::validate_student_login(name, group)?;
        self.current_student = Some(student);
        self.view = AppView::StudentSubjects;
        Ok(())
    }

    /// Begin a quiz session on a subject. Requires a logged-in student.
    pub async fn start_quiz(&mut self, subject_id: &str) -> AppResult<QuizSession> {
        let student = self
            .current_student
            .clone()
            .ok_or_else(|| AppError::missing_field("student"))?;
        let subject = self
            .subjects
            .iter()
            .find(|s| s.id == subject_id)
            .ok_or_else(|| AppError::Other(format!("unknown subject: {}", subject_id)))?;

        self.view = AppView::StudentQuiz;
        Ok(QuizSession::begin(subject, student).await)
    }

    /// Record a finished session's result.
    ///
    /// The result screen is reached no matter what; a failed insert only
    /// means the stored copy may be absent. Returns whether it persisted.
    pub async fn complete_quiz(&mut self, result: TestResult) -> bool {
        let (stored, saved) = match self.store.insert_result(&result).await {
            Ok(stored) => (stored, true),
            Err(e) => {
                warn!(
                    "result for {} not persisted, showing local copy: {}",
                    result.student_name, e
                );
                (result, false)
            }
        };

        self.results.insert(0, stored.clone());
        self.last_result = Some(stored);
        self.last_result_saved = saved;
        self.view = AppView::StudentResult;
        saved
    }

    // ========== Navigation ==========

    pub fn view(&self) -> AppView {
        self.view
    }

    pub fn open_admin_login(&mut self) {
        self.view = AppView::AdminLogin;
    }

    pub fn admin_authenticated(&mut self) {
        self.view = AppView::AdminDashboard;
    }

    pub fn open_admin_results(&mut self) {
        self.view = AppView::AdminResults;
    }

    pub fn back_to_dashboard(&mut self) {
        self.view = AppView::AdminDashboard;
    }

    pub fn open_student_login(&mut self) {
        self.view = AppView::StudentLogin;
    }

    /// Back to the subject list, e.g. after a cancelled session.
    pub fn back_to_subjects(&mut self) {
        self.view = AppView::StudentSubjects;
    }

    pub fn back_home(&mut self) {
        self.view = AppView::Landing;
    }

    // ========== Accessors ==========

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn current_student(&self) -> Option<&Student> {
        self.current_student.as_ref()
    }

    pub fn last_result(&self) -> Option<&TestResult> {
        self.last_result.as_ref()
    }

    /// False when the last completed quiz could not be persisted.
    pub fn last_result_saved(&self) -> bool {
        self.last_result_saved
    }
}

/// Import pipeline statistics.
#[derive(Debug, Default)]
struct ImportStats {
    success: usize,
    failed: usize,
    total: usize,
}

// ========== Log helpers ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 quizhub import pipeline");
    info!("📁 scanning: {}", config.docx_folder);
    info!("{}", "=".repeat(60));
}

fn log_final_stats(stats: &ImportStats) {
    info!("{}", "=".repeat(60));
    info!("📊 import finished");
    info!("✅ succeeded: {}/{}", stats.success, stats.total);
    info!("❌ failed: {}", stats.failed);
    info!("{}", "=".repeat(60));
}
