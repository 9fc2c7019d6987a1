pub mod question;
pub mod result;
pub mod subject;

pub use question::{Question, OPTION_COUNT};
pub use result::{Student, TestResult};
pub use subject::{QuizSettings, Subject};
