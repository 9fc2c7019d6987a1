//! # quizhub
//!
//! Quiz administration and delivery: import question banks from
//! word-processor documents, deliver randomized timed quizzes, persist
//! subjects and results to a remote object store.
//!
//! ## Architecture
//!
//! Layered, leaf to root:
//!
//! ### ① Data layer (`models`)
//! - `Question` / `Subject` / `TestResult` / `Student`: the normalized
//!   schema shared with the remote store
//!
//! ### ② Capability layer (`importer`, `engine`, `services`, `clients`)
//! - `importer`: document payload to markup tree to authored questions
//! - `engine::randomizer`: unbiased question sampling + option shuffling
//! - `engine::session`: the exam state machine (answers, timer, scoring)
//! - `services::report`: results report export
//! - `clients::StoreClient`: remote store REST client (`ObjectStore` seam)
//!
//! ### ③ Orchestration layer (`app`, `view`)
//! - `app::App`: in-memory lists, optimistic persistence fallback,
//!   interactive flows, batch import pipeline
//! - `view`: explicit navigation state and form validation
//!
//! ## Module structure

pub mod app;
pub mod clients;
pub mod config;
pub mod engine;
pub mod error;
pub mod importer;
pub mod logger;
pub mod models;
pub mod services;
pub mod view;

// Re-export the common types
pub use app::App;
pub use clients::{ObjectStore, StoreClient};
pub use config::Config;
pub use engine::{QuizSession, SessionState};
pub use error::{AppError, AppResult, ImportError, PersistenceError, ValidationError};
pub use models::{Question, QuizSettings, Student, Subject, TestResult, OPTION_COUNT};
pub use view::AppView;
