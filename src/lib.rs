//! # convoqa
//!
//! Split conversation transcripts (`.docx`) into questions and answers and
//! summarize the answers with Azure AI Language.
//!
//! ## What it does
//!
//! Meeting and interview transcripts mix questions and answers in one flat
//! document. This crate extracts the paragraph lines, routes each line to a
//! questions or answers pane with a fixed string heuristic, and asks the
//! Azure AI Language abstractive-summarization service for a short summary
//! of the answers. The questions and answers are always produced; a failed
//! summary only changes the summary pane's text.
//!
//! ## Pipeline Overview
//!
//! ```text
//! .docx
//!  │
//!  ├─ 1. Input     resolve local file or download from URL
//!  ├─ 2. Extract   parse paragraphs via docx-rs, trim, drop empties
//!  ├─ 3. Classify  route each line: trailing '?', 'User A:', 'Question:'
//!  ├─ 4. Summarize Azure abstractive summarization (submit + poll)
//!  └─ 5. Output    questions / answers / summary panes + stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use convoqa::{analyze, AnalysisConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credentials may also come from AZURE_LANGUAGE_KEY / AZURE_LANGUAGE_ENDPOINT
//!     let config = AnalysisConfig::builder()
//!         .endpoint("https://my-resource.cognitiveservices.azure.com")
//!         .api_key("...")
//!         .build()?;
//!     let output = analyze("transcript.docx", &config).await?;
//!     println!("{}", output.summary);
//!     eprintln!("{} questions / {} answers",
//!         output.stats.question_lines,
//!         output.stats.answer_lines);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `convoqa` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! convoqa = { version = "0.3", default-features = false }
//! ```
//!
//! ## Testing without the network
//!
//! The remote call sits behind the [`Summarizer`] trait. Inject a double via
//! [`AnalysisConfigBuilder::summarizer`] and the full pipeline runs offline
//! with canned summary fragments.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod summarizer;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{
    analyze, analyze_from_bytes, analyze_sync, analyze_to_files, inspect, ANSWERS_FILENAME,
    QUESTIONS_FILENAME, SUMMARY_FILENAME,
};
pub use config::{AnalysisConfig, AnalysisConfigBuilder};
pub use error::AnalyzeError;
pub use output::{AnalysisOutput, AnalysisStats, DocumentInfo};
pub use pipeline::classify::{is_question, split_lines, QaSplit};
pub use progress::{AnalysisProgressCallback, NoopProgressCallback, ProgressCallback};
pub use summarizer::{AzureLanguageClient, SummarizeError, Summarizer};
