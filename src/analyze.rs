//! Eager (full-document) analysis entry points.
//!
//! This module wires the pipeline stages together: resolve input → extract
//! lines → split questions/answers → summarize answers → assemble the
//! output. The whole run is one sequential pass; the only long pole is the
//! remote summarization job, which blocks until the service finishes or the
//! configured deadline passes.
//!
//! Credential gating happens before any document work: if neither a
//! pre-built summarizer nor credentials (config or environment) are
//! available, the pipeline never starts.

use crate::config::AnalysisConfig;
use crate::error::AnalyzeError;
use crate::output::{AnalysisOutput, AnalysisStats, DocumentInfo};
use crate::pipeline::{classify, extract, input, summarize};
use crate::summarizer::{AzureLanguageClient, Summarizer};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Fixed filename for the questions export.
pub const QUESTIONS_FILENAME: &str = "questions.txt";
/// Fixed filename for the answers export.
pub const ANSWERS_FILENAME: &str = "answers.txt";
/// Fixed filename for the summary export.
pub const SUMMARY_FILENAME: &str = "summary_final.txt";

/// Analyze a `.docx` file or URL.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input`  — Local file path or HTTP/HTTPS URL to a `.docx` document
/// * `config` — Analysis configuration
///
/// # Returns
/// `Ok(AnalysisOutput)` whenever extraction succeeds; a failed summarization
/// shows up as the summary pane's content, never as an `Err`.
///
/// # Errors
/// Returns `Err(AnalyzeError)` only for fatal errors:
/// - Missing credentials (pipeline never starts)
/// - File not found / permission denied / download failure
/// - Not a valid `.docx`, malformed document, or empty document
pub async fn analyze(
    input_str: impl AsRef<str>,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, AnalyzeError> {
    let total_start = Instant::now();
    let input_str = input_str.as_ref();
    info!("Starting analysis: {input_str}");

    if let Some(ref cb) = config.progress_callback {
        cb.on_analysis_start();
    }

    // ── Step 1: Gating — resolve the summarizer ──────────────────────────
    let summarizer = resolve_summarizer(config)?;

    // ── Step 2: Resolve input ────────────────────────────────────────────
    let extract_start = Instant::now();
    let bytes = input::resolve_input(input_str, config.download_timeout_secs).await?;

    run_pipeline(&bytes, summarizer, config, total_start, extract_start).await
}

/// Analyze `.docx` bytes already in memory.
///
/// This is the recommended API when the document comes from an upload
/// buffer, a database, or a network stream rather than a file on disk.
pub async fn analyze_from_bytes(
    bytes: &[u8],
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, AnalyzeError> {
    let total_start = Instant::now();
    info!("Starting analysis of {} in-memory bytes", bytes.len());

    if let Some(ref cb) = config.progress_callback {
        cb.on_analysis_start();
    }

    let summarizer = resolve_summarizer(config)?;
    run_pipeline(bytes, summarizer, config, total_start, Instant::now()).await
}

/// Analyze a document and write the three exports into `out_dir`.
///
/// The files are `questions.txt`, `answers.txt`, and `summary_final.txt`,
/// each byte-identical to the corresponding field of the returned output.
/// Uses atomic writes (temp file + rename) to prevent partial files.
pub async fn analyze_to_files(
    input_str: impl AsRef<str>,
    out_dir: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, AnalyzeError> {
    let output = analyze(input_str, config).await?;
    let out_dir = out_dir.as_ref();

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|e| AnalyzeError::OutputWriteFailed {
            path: out_dir.to_path_buf(),
            source: e,
        })?;

    for (name, contents) in [
        (QUESTIONS_FILENAME, &output.questions),
        (ANSWERS_FILENAME, &output.answers),
        (SUMMARY_FILENAME, &output.summary),
    ] {
        let path = out_dir.join(name);
        let tmp_path = out_dir.join(format!("{name}.tmp"));

        tokio::fs::write(&tmp_path, contents).await.map_err(|e| {
            AnalyzeError::OutputWriteFailed {
                path: path.clone(),
                source: e,
            }
        })?;

        tokio::fs::rename(&tmp_path, &path).await.map_err(|e| {
            AnalyzeError::OutputWriteFailed {
                path: path.clone(),
                source: e,
            }
        })?;

        debug!("Wrote {}", path.display());
    }

    Ok(output)
}

/// Synchronous wrapper around [`analyze`].
///
/// Creates a temporary tokio runtime internally.
pub fn analyze_sync(
    input_str: impl AsRef<str>,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, AnalyzeError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| AnalyzeError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(analyze(input_str, config))
}

/// Extract document facts without summarizing.
///
/// Does not require credentials or any remote call; an empty document
/// reports zero counts rather than failing.
pub async fn inspect(input_str: impl AsRef<str>) -> Result<DocumentInfo, AnalyzeError> {
    let bytes = input::resolve_input(input_str.as_ref(), 120).await?;
    let lines = extract::extract_lines(&bytes)?;
    let split = classify::split_lines(&lines);

    Ok(DocumentInfo {
        paragraph_count: lines.len(),
        question_count: split.question_count,
        answer_count: split.answer_count,
        char_count: lines.iter().map(|l| l.chars().count()).sum(),
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Resolve the summarizer, from most-specific to least-specific:
///
/// 1. **Pre-built summarizer** (`config.summarizer`) — the caller
///    constructed it entirely; used as-is. This is the test seam.
/// 2. **Config credentials** (`config.endpoint` / `config.api_key`).
/// 3. **Environment** (`AZURE_LANGUAGE_ENDPOINT` / `AZURE_LANGUAGE_KEY`)
///    filling in whichever of the two the config left unset.
///
/// Missing pieces surface as distinct [`AnalyzeError::MissingKey`] /
/// [`AnalyzeError::MissingEndpoint`] errors before any document work.
fn resolve_summarizer(config: &AnalysisConfig) -> Result<Arc<dyn Summarizer>, AnalyzeError> {
    if let Some(ref summarizer) = config.summarizer {
        return Ok(Arc::clone(summarizer));
    }

    let api_key = config
        .api_key
        .clone()
        .or_else(|| non_empty_env("AZURE_LANGUAGE_KEY"))
        .ok_or(AnalyzeError::MissingKey)?;

    let endpoint = config
        .endpoint
        .clone()
        .or_else(|| non_empty_env("AZURE_LANGUAGE_ENDPOINT"))
        .ok_or(AnalyzeError::MissingEndpoint)?;

    let client = AzureLanguageClient::new(endpoint, api_key)
        .map_err(|e| AnalyzeError::Internal(format!("Failed to build HTTP client: {e}")))?
        .with_language(&config.language)
        .with_sentence_count(config.sentence_count)
        .with_poll_interval_ms(config.poll_interval_ms)
        .with_timeout_secs(config.api_timeout_secs);

    Ok(Arc::new(client))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Run extract → classify → summarize over resolved bytes.
async fn run_pipeline(
    bytes: &[u8],
    summarizer: Arc<dyn Summarizer>,
    config: &AnalysisConfig,
    total_start: Instant,
    extract_start: Instant,
) -> Result<AnalysisOutput, AnalyzeError> {
    // ── Step 3: Extract lines ────────────────────────────────────────────
    let lines = extract::extract_lines(bytes)?;
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;
    info!("Extracted {} lines in {}ms", lines.len(), extract_duration_ms);

    if let Some(ref cb) = config.progress_callback {
        cb.on_extract_complete(lines.len());
    }

    if lines.is_empty() {
        return Err(AnalyzeError::EmptyDocument);
    }

    // ── Step 4: Split questions from answers ─────────────────────────────
    let split = classify::split_lines(&lines);
    debug!(
        "Split {} lines into {} questions / {} answers",
        lines.len(),
        split.question_count,
        split.answer_count
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_classify_complete(split.question_count, split.answer_count);
    }

    // ── Step 5: Summarize the answers ────────────────────────────────────
    let will_call_service = !split.answers.trim().is_empty();
    if will_call_service {
        if let Some(ref cb) = config.progress_callback {
            cb.on_summarize_start();
        }
    }

    let summarize_start = Instant::now();
    let summary = summarize::summarize_answers(summarizer.as_ref(), &split.answers).await;
    let summarize_duration_ms = summarize_start.elapsed().as_millis() as u64;

    // ── Step 6: Assemble output ──────────────────────────────────────────
    let stats = AnalysisStats {
        total_lines: lines.len(),
        question_lines: split.question_count,
        answer_lines: split.answer_count,
        summary_chars: summary.len(),
        extract_duration_ms,
        summarize_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Analysis complete: {} questions, {} answers, {}ms total",
        stats.question_lines, stats.answer_lines, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_analysis_complete(summary.len());
    }

    Ok(AnalysisOutput {
        questions: split.questions,
        answers: split.answers,
        summary,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::SummarizeError;
    use async_trait::async_trait;

    struct FixedSummarizer;

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _text: &str) -> Result<Vec<String>, SummarizeError> {
            Ok(vec!["canned".to_string()])
        }
    }

    #[test]
    fn prebuilt_summarizer_takes_precedence() {
        let config = AnalysisConfig::builder()
            .summarizer(Arc::new(FixedSummarizer))
            .build()
            .unwrap();
        // No credentials configured anywhere, yet resolution succeeds.
        assert!(resolve_summarizer(&config).is_ok());
    }

    #[test]
    fn export_filenames_are_fixed() {
        assert_eq!(QUESTIONS_FILENAME, "questions.txt");
        assert_eq!(ANSWERS_FILENAME, "answers.txt");
        assert_eq!(SUMMARY_FILENAME, "summary_final.txt");
    }
}
