//! The summary policy: drive a [`Summarizer`] and never fail the pipeline.
//!
//! A failed summary must not block display of the extracted questions and
//! answers, so this stage converts every outcome of the remote call into a
//! displayable string:
//!
//! | Outcome                          | Summary pane content                  |
//! |----------------------------------|---------------------------------------|
//! | input empty/whitespace (no call) | fixed no-answer placeholder           |
//! | fragments returned               | fragments joined with single spaces   |
//! | zero fragments                   | fixed could-not-generate placeholder  |
//! | document-level service error     | `Azure Service Error: ` + message     |
//! | any other failure                | `Logic Error: ` + error display       |
//!
//! Callers therefore always get a `String`, never a `Result`.

use crate::summarizer::{SummarizeError, Summarizer};
use tracing::warn;

/// Returned when the answers blob is empty or whitespace-only; the remote
/// call is skipped entirely.
pub const NO_ANSWER_TEXT_PLACEHOLDER: &str = "No answer text provided to summarize.";

/// Returned when the job succeeds but the service produces no fragments.
pub const NO_SUMMARY_PLACEHOLDER: &str = "AI could not generate a summary.";

/// Prefix identifying a document-level error reported by the service.
pub const SERVICE_ERROR_PREFIX: &str = "Azure Service Error: ";

/// Prefix identifying any other failure of the summarization call.
pub const LOGIC_ERROR_PREFIX: &str = "Logic Error: ";

/// Summarize the answers blob, converting every failure to display text.
pub async fn summarize_answers(summarizer: &dyn Summarizer, text: &str) -> String {
    if text.trim().is_empty() {
        return NO_ANSWER_TEXT_PLACEHOLDER.to_string();
    }

    match summarizer.summarize(text).await {
        Ok(fragments) if fragments.is_empty() => NO_SUMMARY_PLACEHOLDER.to_string(),
        Ok(fragments) => fragments.join(" "),
        Err(SummarizeError::DocumentError { message }) => {
            warn!("Summarization document error: {message}");
            format!("{SERVICE_ERROR_PREFIX}{message}")
        }
        Err(e) => {
            warn!("Summarization failed: {e}");
            format!("{LOGIC_ERROR_PREFIX}{e}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned summarizer double: one fixed outcome per instance, counting
    /// how many times it is called.
    struct CannedSummarizer {
        outcome: fn() -> Result<Vec<String>, SummarizeError>,
        calls: AtomicUsize,
    }

    impl CannedSummarizer {
        fn new(outcome: fn() -> Result<Vec<String>, SummarizeError>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Summarizer for CannedSummarizer {
        async fn summarize(&self, _text: &str) -> Result<Vec<String>, SummarizeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    #[tokio::test]
    async fn whitespace_input_skips_the_remote_call() {
        let double = CannedSummarizer::new(|| Ok(vec!["unused".to_string()]));
        let summary = summarize_answers(&double, "   \n\t  ").await;
        assert_eq!(summary, NO_ANSWER_TEXT_PLACEHOLDER);
        assert_eq!(double.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fragments_join_with_single_spaces() {
        let double = CannedSummarizer::new(|| {
            Ok(vec!["First sentence.".to_string(), "Second.".to_string()])
        });
        let summary = summarize_answers(&double, "some answers").await;
        assert_eq!(summary, "First sentence. Second.");
        assert_eq!(double.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_fragments_yield_placeholder() {
        let double = CannedSummarizer::new(|| Ok(vec![]));
        let summary = summarize_answers(&double, "some answers").await;
        assert_eq!(summary, NO_SUMMARY_PLACEHOLDER);
    }

    #[tokio::test]
    async fn document_error_gets_service_prefix() {
        let double = CannedSummarizer::new(|| {
            Err(SummarizeError::DocumentError {
                message: "rate limited".to_string(),
            })
        });
        let summary = summarize_answers(&double, "some answers").await;
        assert!(summary.starts_with(SERVICE_ERROR_PREFIX), "got: {summary}");
        assert!(summary.contains("rate limited"), "got: {summary}");
    }

    #[tokio::test]
    async fn other_failures_get_logic_prefix() {
        let double = CannedSummarizer::new(|| {
            Err(SummarizeError::PollTimeout { secs: 120 })
        });
        let summary = summarize_answers(&double, "some answers").await;
        assert!(summary.starts_with(LOGIC_ERROR_PREFIX), "got: {summary}");
        assert!(summary.contains("120s"), "got: {summary}");
    }
}
