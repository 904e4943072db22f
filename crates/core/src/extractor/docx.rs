use super::TextExtractor;
use crate::error::ExtractError;
use crate::models::ExtractedText;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the body paragraphs of an OOXML word-processing package.
///
/// Only top-level body paragraphs are emitted, one per line. Table cells,
/// headers and footers are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|error| ExtractError::decode("docx", error))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|error| ExtractError::decode("docx", error))?
            .read_to_string(&mut xml)
            .map_err(|error| ExtractError::decode("docx", error))?;

        Ok(ExtractedText::new(body_paragraphs(&xml)?.join("\n")))
    }
}

pub(crate) fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut table_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|error| ExtractError::decode("docx", error))?;
        let collecting = table_depth == 0 && paragraph_depth == 1;

        match event {
            Event::Start(element) => match element.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(element) => match element.local_name().as_ref() {
                b"p" if table_depth == 0 && paragraph_depth == 0 => paragraphs.push(String::new()),
                b"tab" if collecting && run_depth > 0 => current.push('\t'),
                b"br" | b"cr" if collecting && run_depth > 0 => current.push('\n'),
                _ => {}
            },
            Event::Text(text) if in_text && collecting => {
                let unescaped = text
                    .unescape()
                    .map_err(|error| ExtractError::decode("docx", error))?;
                current.push_str(&unescaped);
            }
            Event::End(element) => match element.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" => {
                    if paragraph_depth == 1 && table_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
