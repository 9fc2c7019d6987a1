//! Quiz delivery engine: per-session question sampling and the exam state
//! machine.

pub mod randomizer;
pub mod session;

pub use randomizer::{draw, draw_with_rng};
pub use session::{QuizSession, SessionState};
