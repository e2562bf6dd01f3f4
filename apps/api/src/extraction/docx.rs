//! DOCX paragraphs: a DOCX file is a ZIP archive whose body lives in
//! `word/document.xml`. Each `<w:p>` is one paragraph; its text is the
//! concatenation of the `<w:t>` runs inside it.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the decompressed `word/document.xml`. The upload limit only
/// bounds the compressed archive.
const MAX_DOCUMENT_XML_BYTES: u64 = 64 * 1024 * 1024;

pub fn extract_paragraphs(data: &[u8]) -> Result<Vec<String>, ExtractionError> {
    extract_paragraphs_limited(data, MAX_DOCUMENT_XML_BYTES)
}

fn extract_paragraphs_limited(data: &[u8], limit: u64) -> Result<Vec<String>, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    let mut raw = Vec::new();
    archive
        .by_name(DOCUMENT_PART)?
        .take(limit + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ExtractionError::Docx(format!("failed to read {DOCUMENT_PART}: {e}")))?;
    if raw.len() as u64 > limit {
        return Err(ExtractionError::Docx(format!(
            "{DOCUMENT_PART} expands beyond {limit} bytes"
        )));
    }

    let xml = String::from_utf8(raw)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_PART} is not UTF-8: {e}")))?;
    parse_document_xml(&xml)
}

/// Paragraphs are emitted in document order. A paragraph nested inside
/// another (text boxes) first flushes the outer text collected so far.
/// `mc:Fallback` duplicates its `mc:Choice` sibling and is skipped.
fn parse_document_xml(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut paragraph_depth = 0usize;
    let mut fallback_depth = 0usize;
    let mut in_text_run = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractionError::Xml(e.to_string()))?;

        if fallback_depth > 0 {
            match &event {
                Event::Start(e) if e.name().as_ref() == b"mc:Fallback" => fallback_depth += 1,
                Event::End(e) if e.name().as_ref() == b"mc:Fallback" => fallback_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(ref e) => match e.name().as_ref() {
                b"w:p" => {
                    if paragraph_depth > 0 && !current.is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraph_depth += 1;
                }
                b"w:t" => in_text_run = true,
                b"mc:Fallback" => fallback_depth = 1,
                _ => {}
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                // Tabs and line breaks separate words inside a paragraph
                b"w:tab" | b"w:br" | b"w:cr" if paragraph_depth > 0 => current.push(' '),
                // Self-closing empty paragraph
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(ref e) => {
                if in_text_run {
                    let text = e
                        .unescape()
                        .map_err(|err| ExtractionError::Xml(err.to_string()))?;
                    current.push_str(&text);
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    paragraphs.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
