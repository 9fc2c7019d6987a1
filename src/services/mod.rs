pub mod report;

pub use report::{filter_results, ReportWriter};
