//! Résumé text extraction: PDF bytes in, normalized plain text out.
//!
//! Pipeline: per-page text → join with a blank line → trim → collapse runs of 3+
//! newlines → minimum-length check → truncate to the model's input budget.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Below this many characters the PDF is assumed to be a scanned image.
pub const MIN_TEXT_CHARS: usize = 100;
/// Upper bound on résumé text sent to the model.
pub const MAX_TEXT_CHARS: usize = 30_000;
pub const TRUNCATION_MARKER: &str = "\n\n[Resume truncated due to length]";

const PDF_MAGIC: &[u8] = b"%PDF-";

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error reading PDF: {0}")]
    Failed(String),

    #[error("Could not extract enough text from PDF ({chars} characters)")]
    InsufficientText { chars: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedDocument {
    pub text: String,
    pub char_count: usize,
}

/// Extracts and normalizes the text of an in-memory PDF.
pub fn extract(file_bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
    if !file_bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractionError::Failed(
            "file is not a PDF document".to_string(),
        ));
    }

    let pages = pdf_extract::extract_text_from_mem_by_pages(file_bytes).map_err(|e| {
        warn!("PDF parse failed: {e}");
        ExtractionError::Failed(e.to_string())
    })?;
    debug!("Extracted {} PDF page(s)", pages.len());

    normalize_pages(&pages)
}

/// Joins page texts and applies cleanup, the length floor and truncation.
pub fn normalize_pages<S: AsRef<str>>(pages: &[S]) -> Result<ExtractedDocument, ExtractionError> {
    let joined = pages
        .iter()
        .map(AsRef::as_ref)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    let text = EXCESS_NEWLINES
        .replace_all(joined.trim(), "\n\n")
        .into_owned();

    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(ExtractionError::InsufficientText { chars });
    }

    let text = truncate_resume(text);
    let char_count = text.chars().count();
    Ok(ExtractedDocument { text, char_count })
}

/// Cuts text longer than `MAX_TEXT_CHARS` and appends `TRUNCATION_MARKER`.
pub fn truncate_resume(text: String) -> String {
    match text.char_indices().nth(MAX_TEXT_CHARS) {
        Some((cut, _)) => {
            let mut truncated = text[..cut].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => text,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn long_line(len: usize) -> String {
        "Senior Rust engineer with distributed systems experience. "
            .chars()
            .cycle()
            .take(len)
            .collect()
    }

    #[test]
    fn test_pages_joined_with_blank_line() {
        let page1 = long_line(80);
        let page2 = long_line(80);
        let doc = normalize_pages(&[page1.clone(), page2.clone()]).unwrap();
        assert_eq!(doc.text, format!("{page1}\n\n{page2}").trim());
    }

    #[test]
    fn test_empty_pages_are_skipped() {
        let body = long_line(150);
        let doc = normalize_pages(&["".to_string(), body.clone(), "".to_string()]).unwrap();
        assert_eq!(doc.text, body.trim());
    }

    #[test]
    fn test_runs_of_newlines_collapse_to_two() {
        let text = format!("{}\n\n\n\n\nEXPERIENCE\n\n\n{}", long_line(60), long_line(60));
        let doc = normalize_pages(&[text]).unwrap();
        assert!(!doc.text.contains("\n\n\n"));
        assert!(doc.text.contains("\n\nEXPERIENCE\n\n"));
    }

    #[test]
    fn test_outer_whitespace_trimmed() {
        let body = long_line(120);
        let doc = normalize_pages(&[format!("\n\n  {body}\n\n\n")]).unwrap();
        assert_eq!(doc.text, body.trim());
    }

    #[test]
    fn test_short_text_is_insufficient() {
        let err = normalize_pages(&["John Doe\nRust".to_string()]).unwrap_err();
        assert!(matches!(err, ExtractionError::InsufficientText { chars: 13 }));
    }

    #[test]
    fn test_empty_document_is_insufficient() {
        let pages: [&str; 0] = [];
        let err = normalize_pages(&pages).unwrap_err();
        assert!(matches!(err, ExtractionError::InsufficientText { chars: 0 }));
    }

    #[test]
    fn test_exactly_min_chars_is_accepted() {
        let doc = normalize_pages(&["a".repeat(MIN_TEXT_CHARS)]).unwrap();
        assert_eq!(doc.char_count, MIN_TEXT_CHARS);
    }

    #[test]
    fn test_truncation_noop_at_limit() {
        let text = "x".repeat(MAX_TEXT_CHARS);
        assert_eq!(truncate_resume(text.clone()), text);
    }

    #[test]
    fn test_truncation_over_limit() {
        let text = "y".repeat(MAX_TEXT_CHARS + 500);
        let out = truncate_resume(text.clone());
        assert_eq!(
            out.chars().count(),
            MAX_TEXT_CHARS + TRUNCATION_MARKER.chars().count()
        );
        assert!(out.ends_with(TRUNCATION_MARKER));
        assert!(text.starts_with(out.strip_suffix(TRUNCATION_MARKER).unwrap()));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "é".repeat(MAX_TEXT_CHARS + 1);
        let out = truncate_resume(text);
        let prefix = out.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert_eq!(prefix.chars().count(), MAX_TEXT_CHARS);
    }

    #[test]
    fn test_char_count_reflects_truncated_text() {
        let doc = normalize_pages(&["z".repeat(MAX_TEXT_CHARS * 2)]).unwrap();
        assert_eq!(doc.char_count, doc.text.chars().count());
        assert!(doc.text.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_non_pdf_bytes_rejected() {
        let err = extract(b"PK\x03\x04 this is a zip file").unwrap_err();
        assert!(matches!(err, ExtractionError::Failed(_)));
    }

    #[test]
    fn test_corrupt_pdf_fails() {
        let err = extract(b"%PDF-1.4\nthis is not really a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Failed(_)));
    }

    #[test]
    fn test_text_pdf_extracts() {
        let pdf = testing::text_pdf(testing::FIXTURE_LINES);
        let doc = extract(&pdf).unwrap();

        assert!(doc.char_count >= MIN_TEXT_CHARS);
        assert_eq!(doc.char_count, doc.text.chars().count());
        assert!(!doc.text.contains("\n\n\n"));
        for word in ["Jane", "Kubernetes", "Postgres", "gateway"] {
            assert!(doc.text.contains(word), "missing {word} in {:?}", doc.text);
        }
    }

    #[test]
    fn test_text_pdf_with_too_little_text_is_insufficient() {
        let pdf = testing::text_pdf(&["Jane Roe"]);
        let err = extract(&pdf).unwrap_err();
        assert!(matches!(err, ExtractionError::InsufficientText { .. }));
    }
}
