//! Text extraction: `.docx` bytes → ordered non-empty paragraph lines.
//!
//! A `.docx` file is a ZIP archive of XML parts; docx-rs parses it into a
//! typed tree. The text lives at the leaves of
//! `Document → Paragraph → Run → Text`, and a paragraph's text is the
//! concatenation of its runs (runs are style spans within one paragraph, not
//! separate words). Only paragraph nodes are read — tables, images, and
//! styles are ignored.

use crate::error::AnalyzeError;
use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};
use tracing::debug;

/// Extract the ordered sequence of trimmed, non-empty paragraph lines.
///
/// Paragraphs whose trimmed text is empty (blank lines, section breaks) are
/// dropped; the remaining lines keep their document order. Malformed input
/// yields [`AnalyzeError::MalformedDocument`] with the parser's detail.
pub fn extract_lines(bytes: &[u8]) -> Result<Vec<String>, AnalyzeError> {
    let docx = read_docx(bytes).map_err(|e| AnalyzeError::MalformedDocument {
        detail: format!("{e:?}"),
    })?;

    let mut lines = Vec::new();

    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            let text = paragraph_text(para);
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
    }

    debug!("Extracted {} non-empty paragraphs", lines.len());
    Ok(lines)
}

/// Concatenate the text runs of a single paragraph.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();

    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    text.push_str(&t.text);
                }
            }
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};

    /// Build an in-memory `.docx` with one paragraph per input string.
    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for p in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*p)));
        }
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack docx");
        cursor.into_inner()
    }

    #[test]
    fn extracts_paragraphs_in_order() {
        let bytes = docx_bytes(&["first", "second", "third"]);
        let lines = extract_lines(&bytes).expect("extract");
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn trims_and_drops_empty_paragraphs() {
        let bytes = docx_bytes(&["  padded  ", "", "   ", "kept"]);
        let lines = extract_lines(&bytes).expect("extract");
        assert_eq!(lines, vec!["padded", "kept"]);
    }

    #[test]
    fn empty_document_yields_empty_sequence() {
        let bytes = docx_bytes(&[]);
        let lines = extract_lines(&bytes).expect("extract");
        assert!(lines.is_empty());
    }

    #[test]
    fn garbage_bytes_are_malformed() {
        let err = extract_lines(b"not a zip archive at all").unwrap_err();
        assert!(matches!(err, AnalyzeError::MalformedDocument { .. }));
    }

    #[test]
    fn multiple_runs_concatenate_within_a_paragraph() {
        let docx = Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Hello, "))
                .add_run(Run::new().add_text("world")),
        );
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack docx");

        let lines = extract_lines(&cursor.into_inner()).expect("extract");
        assert_eq!(lines, vec!["Hello, world"]);
    }
}
