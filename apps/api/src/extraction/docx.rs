//! Word (.docx) to text: reads the run text of `word/document.xml`, one line per paragraph.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::{with_temp_document, ExtractionError};

const DOCUMENT_PART: &str = "word/document.xml";

/// Cap on the inflated size of `word/document.xml`. The compressed upload is
/// bounded by the body limit; the inflated part is not.
const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    with_temp_document(bytes, ".docx", |path| {
        let xml = read_document_part(path, MAX_DOCUMENT_XML_BYTES)?;
        document_xml_to_text(&xml)
    })
}

fn read_document_part(path: &Path, limit: u64) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(File::open(path)?).map_err(|e| ExtractionError::Word(e.to_string()))?;
    let part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Word(format!("{DOCUMENT_PART}: {e}")))?;

    // The header's declared size can lie, so the read itself is bounded.
    let mut raw = Vec::new();
    part.take(limit + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ExtractionError::Word(format!("{DOCUMENT_PART}: {e}")))?;
    if raw.len() as u64 > limit {
        return Err(ExtractionError::Word(format!(
            "{DOCUMENT_PART} exceeds size limit of {limit} bytes"
        )));
    }
    String::from_utf8(raw).map_err(|e| ExtractionError::Word(format!("{DOCUMENT_PART}: {e}")))
}

fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    // Only `<w:t>` carries visible text; instrText, field codes etc. are skipped.
    let mut in_run_text = false;
    // Tabs and breaks count only inside a run; `<w:tabs>` in paragraph
    // properties holds tab-stop definitions with the same element name.
    let mut in_run = false;

    loop {
        match reader.read_event().map_err(word_err)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_run_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" if in_run => text.push('\t'),
                b"w:br" | b"w:cr" if in_run => text.push('\n'),
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape().map_err(word_err)?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text.trim().to_string())
}

fn word_err(e: quick_xml::Error) -> ExtractionError {
    ExtractionError::Word(e.to_string())
}
