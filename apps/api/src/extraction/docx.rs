//! DOCX → plain text.
//!
//! Reads `word/document.xml` from the archive. Body paragraphs come first,
//! one per line, followed by table rows with their cells separated by spaces.

use std::io::{Cursor, Read};
use std::mem;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let xml = read_document_part(bytes)?;
    document_text(&xml).map_err(failure)
}

fn failure(e: impl std::fmt::Display) -> ExtractionError {
    ExtractionError::ExtractionFailure(format!("Failed to parse DOCX: {e}"))
}

fn read_document_part(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(failure)?;
    let mut part = archive.by_name(DOCUMENT_PART).map_err(failure)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(failure)?;
    Ok(xml)
}

/// Text collected while walking the document XML.
///
/// Paragraphs nested anywhere inside a table belong to the enclosing
/// top-level cell.
#[derive(Default)]
struct DocumentText {
    paragraphs: Vec<String>,
    rows: Vec<Vec<String>>,
    table_depth: usize,
    in_run: bool,
    in_text: bool,
    paragraph: String,
    cell: Vec<String>,
    row: Vec<String>,
}

impl DocumentText {
    fn open(&mut self, name: &[u8]) {
        match name {
            b"p" => self.paragraph.clear(),
            b"r" => self.in_run = true,
            b"t" => self.in_text = true,
            b"tab" if self.in_run => self.paragraph.push('\t'),
            b"br" | b"cr" if self.in_run => self.paragraph.push('\n'),
            b"tbl" => self.table_depth += 1,
            b"tr" if self.table_depth == 1 => self.row.clear(),
            b"tc" if self.table_depth == 1 => self.cell.clear(),
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"r" => self.in_run = false,
            b"t" => self.in_text = false,
            b"p" => {
                let paragraph = mem::take(&mut self.paragraph);
                if self.table_depth == 0 {
                    self.paragraphs.push(paragraph);
                } else {
                    self.cell.push(paragraph);
                }
            }
            b"tc" if self.table_depth == 1 => {
                let cell = mem::take(&mut self.cell).join("\n");
                self.row.push(cell);
            }
            b"tr" if self.table_depth == 1 => self.rows.push(mem::take(&mut self.row)),
            b"tbl" => self.table_depth = self.table_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn render(self) -> String {
        let mut text = String::new();
        for paragraph in &self.paragraphs {
            text.push_str(paragraph);
            text.push('\n');
        }
        for row in &self.rows {
            for cell in row {
                text.push_str(cell);
                text.push(' ');
            }
            text.push('\n');
        }
        text.trim().to_string()
    }
}

fn document_text(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut doc = DocumentText::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => doc.open(e.local_name().as_ref()),
            Event::Empty(e) => {
                let name = e.local_name();
                doc.open(name.as_ref());
                doc.close(name.as_ref());
            }
            Event::End(e) => doc.close(e.local_name().as_ref()),
            Event::Text(t) if doc.in_text => doc.paragraph.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(doc.render())
}
