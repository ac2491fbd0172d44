//! Turns an uploaded resume file into a `ResumeDocument` pre-fill.
//!
//! Text formats only yield contact guesses; the rest of the document is the
//! blank skeleton the form starts from. JSON uploads are taken as structured
//! data and merged onto the skeleton.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::ResumeDocument;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email regex is valid")
});
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}").expect("phone regex is valid")
});
static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"linkedin\.com/in/[a-zA-Z0-9-]+").expect("linkedin regex is valid")
});
static DOCX_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("docx run regex is valid"));

/// Upload formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Pdf,
    Docx,
    Doc,
    Text,
    Json,
}

impl UploadFormat {
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(UploadFormat::Pdf),
            "docx" => Ok(UploadFormat::Docx),
            "doc" => Ok(UploadFormat::Doc),
            "txt" => Ok(UploadFormat::Text),
            "json" => Ok(UploadFormat::Json),
            _ => Err(AppError::UnsupportedFormat(format!(
                "Unsupported file type: {filename}"
            ))),
        }
    }
}

pub fn parse_upload(filename: &str, bytes: &[u8]) -> Result<ResumeDocument, AppError> {
    let text = match UploadFormat::from_filename(filename)? {
        UploadFormat::Json => return parse_json(bytes),
        UploadFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::BadRequest(format!("Could not read PDF: {e}")))?,
        UploadFormat::Docx => docx_text(bytes)?,
        UploadFormat::Doc => doc_text(bytes),
        UploadFormat::Text => String::from_utf8_lossy(bytes).into_owned(),
    };
    Ok(prefill_from_text(&text))
}

/// Skeleton document with contact details guessed from free text.
pub fn prefill_from_text(text: &str) -> ResumeDocument {
    let mut doc = ResumeDocument::skeleton();
    doc.contact.email = first_match(&EMAIL, text).unwrap_or_default();
    doc.contact.phone = first_match(&PHONE, text).unwrap_or_default();
    doc.contact.linked_in = first_match(&LINKEDIN, text);
    doc
}

fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}

fn parse_json(bytes: &[u8]) -> Result<ResumeDocument, AppError> {
    let upload: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON file: {e}")))?;

    let Value::Object(fields) = upload else {
        return Err(AppError::BadRequest("Invalid resume JSON structure".to_string()));
    };
    if !fields.contains_key("contact") || !fields.contains_key("summary") {
        return Err(AppError::BadRequest(
            "Invalid resume JSON structure: contact and summary are required".to_string(),
        ));
    }

    let mut merged = serde_json::to_value(ResumeDocument::skeleton())
        .map_err(|e| AppError::Internal(e.into()))?;
    if let Value::Object(base) = &mut merged {
        base.extend(fields);
    }
    serde_json::from_value(merged)
        .map_err(|e| AppError::BadRequest(format!("Invalid resume JSON structure: {e}")))
}

/// Paragraph text of `word/document.xml`, one line per paragraph.
fn docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::BadRequest(format!("Could not open DOCX archive: {e}")))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::BadRequest(format!("DOCX has no document body: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::BadRequest(format!("Could not read DOCX body: {e}")))?;

    let lines: Vec<String> = xml
        .split("</w:p>")
        .map(|paragraph| {
            DOCX_RUN
                .captures_iter(paragraph)
                .filter_map(|c| c.get(1))
                .map(|m| unescape_xml(m.as_str()))
                .collect::<String>()
        })
        .filter(|line| !line.trim().is_empty())
        .collect();
    Ok(lines.join("\n"))
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Legacy binary Word files: keep whatever decodes as printable text. Text runs
/// are usually stored as UTF-16LE, so dropping NULs recovers ASCII content.
fn doc_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .filter(|c| *c != '\u{FFFD}')
        .collect()
}
