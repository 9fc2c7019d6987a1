//! Low-level `.docx` decoding.
//!
//! A docx file is a ZIP archive; the body markup lives in
//! `word/document.xml`, image relationships in
//! `word/_rels/document.xml.rels`, and the image payloads under
//! `word/media/`. This module walks the markup once and produces a small
//! tree of tables, rows and cells with all images already inlined as
//! `data:` URIs, so nothing downstream ever touches the archive again.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use base64::{engine::general_purpose::STANDARD, Engine};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::error::{AppError, AppResult};

/// One table cell: trimmed-later text plus at most one inlined image.
#[derive(Debug, Clone, Default)]
pub struct DocCell {
    pub text: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DocRow {
    pub cells: Vec<DocCell>,
}

impl DocRow {
    /// Content of a row under the vertical convention: the first cell if
    /// present, otherwise empty text (never null).
    pub fn primary(&self) -> DocCell {
        self.cells.first().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocTable {
    pub rows: Vec<DocRow>,
}

/// The markup tree of one parsed document.
#[derive(Debug, Clone, Default)]
pub struct DocxDocument {
    pub tables: Vec<DocTable>,
    /// Body paragraphs outside any table, in document order. Used by the
    /// text-only fallback when table scanning yields nothing.
    pub paragraphs: Vec<String>,
}

/// Decode a document payload into its markup tree.
///
/// Structural problems (not a ZIP, missing body part, broken XML) surface
/// as `ImportError` variants; a well-formed document with no tables is a
/// perfectly valid empty tree.
pub fn read_document(bytes: &[u8]) -> AppResult<DocxDocument> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let body_xml = read_part(&mut archive, "word/document.xml")?
        .ok_or_else(|| AppError::missing_part("word/document.xml"))?;

    // The relationships part is optional: a document without images simply
    // has no image relationships to resolve.
    let images = match read_part(&mut archive, "word/_rels/document.xml.rels")? {
        Some(rels_xml) => load_images(&mut archive, &rels_xml)?,
        None => HashMap::new(),
    };

    debug!("document.xml: {} bytes, {} inlined images", body_xml.len(), images.len());

    parse_body(&body_xml, &images)
}

/// Read one archive entry as UTF-8, `None` when the entry does not exist.
fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> AppResult<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(AppError::unreadable_document)?;
    Ok(Some(content))
}

/// Resolve every image relationship to an inlined data URI, keyed by
/// relationship id.
fn load_images(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    rels_xml: &str,
) -> AppResult<HashMap<String, String>> {
    let mut targets = HashMap::new();
    let mut reader = Reader::from_str(rels_xml);
    reader.trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Relationship" => {
                let mut id = String::new();
                let mut target = String::new();
                let mut rel_type = String::new();

                for attr in e.attributes().flatten() {
                    let value = attr
                        .decode_and_unescape_value(&reader)
                        .unwrap_or_default()
                        .to_string();
                    match attr.key.as_ref() {
                        b"Id" => id = value,
                        b"Target" => target = value,
                        b"Type" => rel_type = value,
                        _ => {}
                    }
                }

                if rel_type.contains("/image") && !id.is_empty() && !target.is_empty() {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let mut images = HashMap::new();
    for (id, target) in targets {
        // Targets are relative to word/ ("media/image1.png"); the rare
        // absolute form carries a leading slash.
        let path = match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("word/{}", target),
        };

        let mut file = match archive.by_name(&path) {
            Ok(file) => file,
            Err(_) => {
                debug!("image part {} referenced but missing, skipping", path);
                continue;
            }
        };
        let mut payload = Vec::new();
        file.read_to_end(&mut payload)
            .map_err(AppError::unreadable_document)?;

        let data_uri = format!(
            "data:{};base64,{}",
            mime_for_path(&path),
            STANDARD.encode(&payload)
        );
        images.insert(id, data_uri);
    }

    Ok(images)
}

fn mime_for_path(path: &str) -> &'static str {
    let extension = path.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        _ => "application/octet-stream",
    }
}

/// Single pass over `word/document.xml` collecting tables and body
/// paragraphs.
fn parse_body(body_xml: &str, images: &HashMap<String, String>) -> AppResult<DocxDocument> {
    let mut reader = Reader::from_str(body_xml);

    let mut doc = DocxDocument::default();

    // Tables can nest; only the outermost one is structural, inner content
    // just flows into the enclosing cell.
    let mut table_depth: usize = 0;
    let mut current_table: Option<DocTable> = None;
    let mut current_row: Option<DocRow> = None;
    let mut current_cell: Option<DocCell> = None;
    let mut paragraph = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        current_table = Some(DocTable::default());
                    }
                }
                b"w:tr" if table_depth == 1 => {
                    current_row = Some(DocRow::default());
                }
                b"w:tc" if table_depth == 1 => {
                    current_cell = Some(DocCell::default());
                }
                // `a:blip` may appear as a start tag with children.
                b"a:blip" => {
                    record_image(&e, &reader, images, current_cell.as_mut());
                }
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" => {
                    table_depth = table_depth.saturating_sub(1);
                    if table_depth == 0 {
                        if let Some(table) = current_table.take() {
                            doc.tables.push(table);
                        }
                    }
                }
                b"w:tr" if table_depth == 1 => {
                    if let (Some(table), Some(row)) = (current_table.as_mut(), current_row.take()) {
                        table.rows.push(row);
                    }
                }
                b"w:tc" if table_depth == 1 => {
                    if let (Some(row), Some(cell)) = (current_row.as_mut(), current_cell.take()) {
                        row.cells.push(cell);
                    }
                }
                b"w:p" => {
                    if let Some(cell) = current_cell.as_mut() {
                        // Paragraph break inside a cell becomes a space.
                        if !cell.text.is_empty() && !cell.text.ends_with(' ') {
                            cell.text.push(' ');
                        }
                    } else if table_depth == 0 {
                        doc.paragraphs.push(std::mem::take(&mut paragraph));
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:br" | b"w:tab" => {
                    if let Some(cell) = current_cell.as_mut() {
                        cell.text.push(' ');
                    } else if table_depth == 0 {
                        paragraph.push(' ');
                    }
                }
                b"a:blip" => {
                    record_image(&e, &reader, images, current_cell.as_mut());
                }
                _ => {}
            },
            Event::Text(e) => {
                let text = e.unescape()?;
                if let Some(cell) = current_cell.as_mut() {
                    cell.text.push_str(&text);
                } else if table_depth == 0 {
                    paragraph.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(doc)
}

/// Attach the referenced image to the enclosing cell. Only the first image
/// per cell is kept; images outside tables are dropped (the text fallback
/// carries no images).
fn record_image(
    e: &quick_xml::events::BytesStart<'_>,
    reader: &Reader<&[u8]>,
    images: &HashMap<String, String>,
    cell: Option<&mut DocCell>,
) {
    let Some(cell) = cell else { return };
    if cell.image.is_some() {
        return;
    }

    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"r:embed" {
            if let Ok(rid) = attr.decode_and_unescape_value(reader) {
                if let Some(data_uri) = images.get(rid.as_ref()) {
                    cell.image = Some(data_uri.clone());
                }
            }
        }
    }
}
