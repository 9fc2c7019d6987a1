//! Table-convention question extraction.
//!
//! Two row layouts are supported, auto-detected per table by shape:
//!
//! - **Horizontal**: one row = one question, at least 5 cells
//!   (cell 0 prompt, cells 1-4 options). Chosen whenever the first row has
//!   5 or more cells; this precedence also resolves the ambiguous 5-row /
//!   5-column case.
//! - **Vertical**: every complete group of 5 rows = one question
//!   (prompt row + 4 option rows, each row contributing its first cell).
//!
//! When no table yields anything, a reduced-fidelity fallback groups the
//! body paragraphs into 5-line blocks (text only, no images).

use chrono::Utc;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::importer::docx::{self, DocCell, DocTable};
use crate::models::{Question, OPTION_COUNT};

/// Rows (or lines) per question under the vertical convention.
const GROUP_SIZE: usize = OPTION_COUNT + 1;

/// Parse a raw document payload into authored questions.
///
/// Structural failures and the no-questions case come back as distinct
/// `ImportError` variants so the caller can show different guidance.
pub fn parse(bytes: &[u8]) -> AppResult<Vec<Question>> {
    let doc = docx::read_document(bytes)?;
    let mut ids = QuestionIdGen::new();

    let mut questions = Vec::new();
    for table in &doc.tables {
        extract_table(table, &mut ids, &mut questions);
    }

    if questions.is_empty() {
        debug!("no table questions found, trying plain-text fallback");
        extract_lines(&doc.paragraphs, &mut ids, &mut questions);
    }

    if questions.is_empty() {
        return Err(AppError::no_questions_found());
    }

    Ok(questions)
}

/// Generates batch-unique question ids that stay ordered by extraction
/// sequence. Opaque beyond that.
struct QuestionIdGen {
    seq: usize,
    batch: i64,
}

impl QuestionIdGen {
    fn new() -> Self {
        Self {
            seq: 0,
            batch: Utc::now().timestamp_millis(),
        }
    }

    fn next(&mut self) -> String {
        self.seq += 1;
        format!("q-{:04}-{}", self.seq, self.batch)
    }
}

fn extract_table(table: &DocTable, ids: &mut QuestionIdGen, out: &mut Vec<Question>) {
    let horizontal = table
        .rows
        .first()
        .is_some_and(|row| row.cells.len() >= GROUP_SIZE);

    if horizontal {
        extract_horizontal(table, ids, out);
    } else {
        extract_vertical(table, ids, out);
    }
}

/// One row per question; rows that lost cells along the way are skipped.
fn extract_horizontal(table: &DocTable, ids: &mut QuestionIdGen, out: &mut Vec<Question>) {
    for row in &table.rows {
        if row.cells.len() < GROUP_SIZE {
            continue;
        }
        let cells: Vec<DocCell> = row.cells[..GROUP_SIZE].to_vec();
        push_question(&cells, ids, out);
    }
}

/// Five consecutive rows per question; a trailing partial group is
/// discarded.
fn extract_vertical(table: &DocTable, ids: &mut QuestionIdGen, out: &mut Vec<Question>) {
    for group in table.rows.chunks_exact(GROUP_SIZE) {
        let cells: Vec<DocCell> = group.iter().map(|row| row.primary()).collect();
        push_question(&cells, ids, out);
    }
}

/// Build a question from 5 content cells (prompt + 4 options). Accepted
/// only when the prompt has text or an image; whitespace-only cells count
/// as empty text but empty options are still retained.
fn push_question(cells: &[DocCell], ids: &mut QuestionIdGen, out: &mut Vec<Question>) {
    let prompt_text = cells[0].text.trim().to_string();
    let prompt_image = cells[0].image.clone();

    if prompt_text.is_empty() && prompt_image.is_none() {
        return;
    }

    let mut options: [String; OPTION_COUNT] = Default::default();
    let mut option_images: [Option<String>; OPTION_COUNT] = Default::default();
    for (i, cell) in cells[1..=OPTION_COUNT].iter().enumerate() {
        options[i] = cell.text.trim().to_string();
        option_images[i] = cell.image.clone();
    }

    out.push(Question::authored(
        ids.next(),
        prompt_text,
        prompt_image,
        options,
        option_images,
    ));
}

/// Text-only fallback: every 5 consecutive non-blank lines become one
/// question.
fn extract_lines(paragraphs: &[String], ids: &mut QuestionIdGen, out: &mut Vec<Question>) {
    let lines: Vec<&str> = paragraphs
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    for group in lines.chunks_exact(GROUP_SIZE) {
        let mut options: [String; OPTION_COUNT] = Default::default();
        for (i, line) in group[1..].iter().enumerate() {
            options[i] = (*line).to_string();
        }
        out.push(Question::authored(
            ids.next(),
            group[0].to_string(),
            None,
            options,
            Default::default(),
        ));
    }
}
