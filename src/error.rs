//! Error types for the convoqa library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`AnalyzeError`] — **Fatal**: the analysis cannot proceed at all
//!   (bad input file, not a `.docx`, missing credentials, empty document).
//!   Returned as `Err(AnalyzeError)` from the top-level `analyze*` functions.
//!
//! * [`crate::summarizer::SummarizeError`] — **Non-fatal**: the remote
//!   summarization call failed. It never crosses the `analyze` boundary as an
//!   `Err`; [`crate::pipeline::summarize`] converts every variant into a
//!   displayable summary string so the extracted questions and answers are
//!   still shown.
//!
//! The separation mirrors the pipeline contract: extraction failures halt
//! everything, summarization failures only replace the summary pane.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the convoqa library.
///
/// Summarization failures use [`crate::summarizer::SummarizeError`] and are
/// rendered into the summary string rather than propagated here.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Document not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The file exists and was read, but is not a `.docx` archive.
    ///
    /// A `.docx` file is a ZIP container and must start with `PK\x03\x04`.
    #[error("File is not a valid .docx document: '{path}'\nFirst bytes: {magic:?}")]
    NotADocx { path: PathBuf, magic: [u8; 4] },

    // ── Document errors ───────────────────────────────────────────────────
    /// The ZIP/XML payload could not be parsed as a Word document.
    #[error("Document is malformed and cannot be parsed: {detail}")]
    MalformedDocument { detail: String },

    /// Extraction succeeded but produced no non-empty paragraphs.
    #[error("The document appears to be empty: no non-empty paragraphs were found.")]
    EmptyDocument,

    // ── Credential errors ─────────────────────────────────────────────────
    /// No Azure Language key was supplied.
    #[error(
        "Azure Language key is not configured.\n\
         Pass --key, set AZURE_LANGUAGE_KEY, or provide a pre-built summarizer."
    )]
    MissingKey,

    /// No Azure Language endpoint was supplied.
    #[error(
        "Azure Language endpoint is not configured.\n\
         Pass --endpoint, set AZURE_LANGUAGE_ENDPOINT, or provide a pre-built summarizer."
    )]
    MissingEndpoint,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write one of the export files.
    #[error("Failed to write export file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_docx_display() {
        let e = AnalyzeError::NotADocx {
            path: PathBuf::from("notes.txt"),
            magic: *b"Hell",
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"), "got: {msg}");
        assert!(msg.contains(".docx"), "got: {msg}");
    }

    #[test]
    fn missing_key_mentions_env_var() {
        let msg = AnalyzeError::MissingKey.to_string();
        assert!(msg.contains("AZURE_LANGUAGE_KEY"));
    }

    #[test]
    fn missing_endpoint_mentions_env_var() {
        let msg = AnalyzeError::MissingEndpoint.to_string();
        assert!(msg.contains("AZURE_LANGUAGE_ENDPOINT"));
    }

    #[test]
    fn empty_document_display() {
        let msg = AnalyzeError::EmptyDocument.to_string();
        assert!(msg.contains("empty"));
    }

    #[test]
    fn download_timeout_display() {
        let e = AnalyzeError::DownloadTimeout {
            url: "https://example.com/a.docx".into(),
            secs: 30,
        };
        let msg = e.to_string();
        assert!(msg.contains("30s"));
        assert!(msg.contains("example.com"));
    }
}
