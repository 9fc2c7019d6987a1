//! Importer tests: table-convention extraction, image inlining, the
//! plain-text fallback and the error taxonomy.

use std::io::{Cursor, Write};

use quizhub::{importer, AppError, ImportError};
use zip::write::FileOptions;
use zip::ZipWriter;

// ========== Minimal docx builders ==========

fn build_docx(document_xml: &str, extras: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buf);
        let options = FileOptions::default();
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        for (name, bytes) in extras {
            zip.start_file(*name, options).unwrap();
            zip.write_all(bytes).unwrap();
        }
        zip.finish().unwrap();
    }
    buf.into_inner()
}

fn document(body: &str) -> String {
    format!("<w:document><w:body>{}</w:body></w:document>", body)
}

fn cell(text: &str) -> String {
    format!("<w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc>", text)
}

fn row(cells: &[String]) -> String {
    format!("<w:tr>{}</w:tr>", cells.concat())
}

fn table(rows: &[String]) -> String {
    format!("<w:tbl>{}</w:tbl>", rows.concat())
}

fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text)
}

/// A vertical-convention table: one cell per row, 5 rows per question.
fn vertical_table(questions: usize) -> String {
    let mut rows = Vec::new();
    for q in 0..questions {
        rows.push(row(&[cell(&format!("Prompt {}", q))]));
        for o in 0..4 {
            rows.push(row(&[cell(&format!("Q{} option {}", q, o))]));
        }
    }
    table(&rows)
}

/// A horizontal-convention table: 5 cells per row, one question per row.
fn horizontal_table(questions: usize) -> String {
    let rows: Vec<String> = (0..questions)
        .map(|q| {
            row(&[
                cell(&format!("Prompt {}", q)),
                cell(&format!("Q{} option 0", q)),
                cell(&format!("Q{} option 1", q)),
                cell(&format!("Q{} option 2", q)),
                cell(&format!("Q{} option 3", q)),
            ])
        })
        .collect();
    table(&rows)
}

// ========== Table conventions ==========

#[test]
fn vertical_table_yields_one_question_per_five_rows() {
    let docx = build_docx(&document(&vertical_table(2)), &[]);
    let questions = importer::parse(&docx).unwrap();

    assert_eq!(questions.len(), 2);
    for (i, q) in questions.iter().enumerate() {
        assert_eq!(q.text, format!("Prompt {}", i));
        assert_eq!(q.correct_index, 0);
        assert_eq!(q.options[0], format!("Q{} option 0", i));
        assert_eq!(q.options[3], format!("Q{} option 3", i));
        assert!(q.image.is_none());
    }
}

#[test]
fn vertical_table_discards_trailing_partial_group() {
    // 12 rows: two full groups plus two leftovers.
    let mut rows = Vec::new();
    for q in 0..2 {
        rows.push(row(&[cell(&format!("Prompt {}", q))]));
        for o in 0..4 {
            rows.push(row(&[cell(&format!("opt {}-{}", q, o))]));
        }
    }
    rows.push(row(&[cell("dangling prompt")]));
    rows.push(row(&[cell("dangling option")]));

    let docx = build_docx(&document(&table(&rows)), &[]);
    let questions = importer::parse(&docx).unwrap();
    assert_eq!(questions.len(), 2);
}

#[test]
fn horizontal_table_yields_one_question_per_row() {
    let docx = build_docx(&document(&horizontal_table(3)), &[]);
    let questions = importer::parse(&docx).unwrap();

    assert_eq!(questions.len(), 3);
    for (i, q) in questions.iter().enumerate() {
        assert_eq!(q.text, format!("Prompt {}", i));
        assert_eq!(q.options[1], format!("Q{} option 1", i));
        assert_eq!(q.correct_index, 0);
    }
}

#[test]
fn ambiguous_five_row_table_prefers_horizontal() {
    // 5 rows x 5 cells could be read either way; horizontal wins, so this
    // is 5 questions, not 1.
    let docx = build_docx(&document(&horizontal_table(5)), &[]);
    let questions = importer::parse(&docx).unwrap();
    assert_eq!(questions.len(), 5);
}

#[test]
fn horizontal_rows_without_prompt_are_skipped() {
    let rows = vec![
        row(&[cell("Real prompt"), cell("a"), cell("b"), cell("c"), cell("d")]),
        row(&[cell("   "), cell("a"), cell("b"), cell("c"), cell("d")]),
    ];
    let docx = build_docx(&document(&table(&rows)), &[]);
    let questions = importer::parse(&docx).unwrap();

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].text, "Real prompt");
}

#[test]
fn whitespace_only_option_is_kept_as_empty_text() {
    let rows = vec![row(&[
        cell("Prompt"),
        cell("   "),
        cell("b"),
        cell("c"),
        cell("d"),
    ])];
    let docx = build_docx(&document(&table(&rows)), &[]);
    let questions = importer::parse(&docx).unwrap();

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].options[0], "");
    assert_eq!(questions[0].options[1], "b");
}

#[test]
fn degenerate_table_contributes_nothing() {
    // 3x3: neither convention applies, and with no fallback text the
    // import reports the empty-result signal.
    let rows: Vec<String> = (0..3)
        .map(|r| row(&[cell(&format!("{}", r)), cell("x"), cell("y")]))
        .collect();
    let docx = build_docx(&document(&table(&rows)), &[]);

    let err = importer::parse(&docx).unwrap_err();
    assert!(err.is_empty_import());
}

#[test]
fn question_ids_are_unique_and_ordered() {
    let docx = build_docx(&document(&vertical_table(4)), &[]);
    let questions = importer::parse(&docx).unwrap();

    let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 4);

    let mut ordered = ids.clone();
    ordered.sort();
    assert_eq!(ids, ordered, "ids must follow extraction order");
}

// ========== Images ==========

#[test]
fn images_are_inlined_as_data_uris() {
    const RELS: &str = concat!(
        "<Relationships>",
        "<Relationship Id=\"rId7\" ",
        "Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" ",
        "Target=\"media/image1.png\"/>",
        "</Relationships>"
    );
    let image_cell = concat!(
        "<w:tc><w:p><w:r><w:t>Prompt with picture</w:t>",
        "<w:drawing><a:blip r:embed=\"rId7\"/></w:drawing>",
        "</w:r></w:p></w:tc>"
    );

    let rows = vec![format!(
        "<w:tr>{}{}{}{}{}</w:tr>",
        image_cell,
        cell("a"),
        cell("b"),
        cell("c"),
        cell("d")
    )];
    let docx = build_docx(
        &document(&table(&rows)),
        &[
            ("word/_rels/document.xml.rels", RELS.as_bytes()),
            ("word/media/image1.png", &[0x89, b'P', b'N', b'G', 0x0d]),
        ],
    );

    let questions = importer::parse(&docx).unwrap();
    assert_eq!(questions.len(), 1);

    let image = questions[0].image.as_deref().expect("prompt image");
    assert!(image.starts_with("data:image/png;base64,"));
    assert_eq!(questions[0].text, "Prompt with picture");
    assert!(questions[0].option_images.iter().all(|i| i.is_none()));
}

#[test]
fn option_images_stay_paired_with_their_cells() {
    const RELS: &str = concat!(
        "<Relationships>",
        "<Relationship Id=\"rId1\" ",
        "Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" ",
        "Target=\"media/pic.jpeg\"/>",
        "</Relationships>"
    );
    let option_with_image =
        "<w:tc><w:p><w:r><w:t>b</w:t><a:blip r:embed=\"rId1\"/></w:r></w:p></w:tc>";
    let rows = vec![format!(
        "<w:tr>{}{}{}{}{}</w:tr>",
        cell("Prompt"),
        cell("a"),
        option_with_image,
        cell("c"),
        cell("d")
    )];
    let docx = build_docx(
        &document(&table(&rows)),
        &[
            ("word/_rels/document.xml.rels", RELS.as_bytes()),
            ("word/media/pic.jpeg", &[0xff, 0xd8, 0xff]),
        ],
    );

    let questions = importer::parse(&docx).unwrap();
    let q = &questions[0];
    assert!(q.option_images[0].is_none());
    assert!(q.option_images[1]
        .as_deref()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
    assert!(q.option_images[2].is_none());
}

// ========== Fallback and error taxonomy ==========

#[test]
fn plain_text_fallback_groups_five_lines() {
    let body: String = (0..10)
        .map(|i| paragraph(&format!("line {}", i)))
        .collect();
    let docx = build_docx(&document(&body), &[]);

    let questions = importer::parse(&docx).unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].text, "line 0");
    assert_eq!(questions[0].options[0], "line 1");
    assert_eq!(questions[1].text, "line 5");
    assert!(questions.iter().all(|q| q.image.is_none()));
}

#[test]
fn fallback_skips_blank_lines() {
    let mut body = String::new();
    for i in 0..5 {
        body.push_str(&paragraph(&format!("line {}", i)));
        body.push_str(&paragraph("   "));
    }
    let docx = build_docx(&document(&body), &[]);

    let questions = importer::parse(&docx).unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].text, "line 0");
}

#[test]
fn empty_document_reports_no_questions_found() {
    let docx = build_docx(&document(""), &[]);
    let err = importer::parse(&docx).unwrap_err();

    assert!(err.is_empty_import());
    assert!(matches!(
        err,
        AppError::Import(ImportError::NoQuestionsFound)
    ));
}

#[test]
fn garbage_bytes_report_structural_failure() {
    let err = importer::parse(b"this is not a zip archive").unwrap_err();

    assert!(!err.is_empty_import());
    assert!(matches!(
        err,
        AppError::Import(ImportError::UnreadableDocument { .. })
    ));
}

#[test]
fn archive_without_body_part_reports_missing_part() {
    // A valid ZIP that is not a document.
    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buf);
        zip.start_file("unrelated.txt", FileOptions::default()).unwrap();
        zip.write_all(b"hello").unwrap();
        zip.finish().unwrap();
    }

    let err = importer::parse(&buf.into_inner()).unwrap_err();
    assert!(matches!(
        err,
        AppError::Import(ImportError::MissingDocumentPart { .. })
    ));
}
