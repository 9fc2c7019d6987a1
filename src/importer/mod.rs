//! Document-to-question-bank importer.
//!
//! `docx` turns the raw document payload into a markup tree (tables of
//! text/image cells plus plain body paragraphs); `questions` applies the
//! two supported table conventions to that tree and produces normalized
//! [`Question`](crate::models::Question) values.

pub mod docx;
pub mod questions;

pub use docx::{read_document, DocCell, DocRow, DocTable, DocxDocument};
pub use questions::parse;
