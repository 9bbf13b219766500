//! Progress-callback trait for pipeline stage events.
//!
//! Inject an [`Arc<dyn AnalysisProgressCallback>`] via
//! [`crate::config::AnalysisConfigBuilder::progress_callback`] to receive
//! events as the pipeline moves through its stages. Callers can forward the
//! events to a terminal spinner, a log, or a UI without the library knowing
//! anything about how the host application communicates.
//!
//! # Example
//!
//! ```rust
//! use convoqa::{AnalysisProgressCallback, AnalysisConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     lines: Arc<AtomicUsize>,
//! }
//!
//! impl AnalysisProgressCallback for CountingCallback {
//!     fn on_extract_complete(&self, line_count: usize) {
//!         self.lines.store(line_count, Ordering::SeqCst);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     lines: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = AnalysisConfig::builder()
//!     .progress_callback(counter as Arc<dyn AnalysisProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the analysis pipeline as each stage completes.
///
/// Implementations must be `Send + Sync`. All methods have default no-op
/// implementations so callers only override what they care about. Events
/// arrive in pipeline order from a single task; there is no concurrent
/// delivery to guard against.
pub trait AnalysisProgressCallback: Send + Sync {
    /// Called once before input resolution begins.
    fn on_analysis_start(&self) {}

    /// Called when text extraction finishes.
    ///
    /// # Arguments
    /// * `line_count` — non-empty paragraphs extracted from the document
    fn on_extract_complete(&self, line_count: usize) {
        let _ = line_count;
    }

    /// Called when the question/answer split finishes.
    ///
    /// # Arguments
    /// * `question_count` — lines routed to the questions pane
    /// * `answer_count`   — lines routed to the answers pane
    fn on_classify_complete(&self, question_count: usize, answer_count: usize) {
        let _ = (question_count, answer_count);
    }

    /// Called just before the remote summarization job is submitted.
    ///
    /// Not called when the answers blob is empty and the remote call is
    /// skipped.
    fn on_summarize_start(&self) {}

    /// Called once after the pipeline finishes.
    ///
    /// # Arguments
    /// * `summary_len` — byte length of the summary pane
    fn on_analysis_complete(&self, summary_len: usize) {
        let _ = summary_len;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl AnalysisProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::AnalysisConfig`].
pub type ProgressCallback = Arc<dyn AnalysisProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        extracted: AtomicUsize,
        questions: AtomicUsize,
        answers: AtomicUsize,
        summarize_starts: AtomicUsize,
        completed_len: AtomicUsize,
    }

    impl AnalysisProgressCallback for TrackingCallback {
        fn on_analysis_start(&self) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_extract_complete(&self, line_count: usize) {
            self.extracted.store(line_count, Ordering::SeqCst);
        }

        fn on_classify_complete(&self, question_count: usize, answer_count: usize) {
            self.questions.store(question_count, Ordering::SeqCst);
            self.answers.store(answer_count, Ordering::SeqCst);
        }

        fn on_summarize_start(&self) {
            self.summarize_starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_analysis_complete(&self, summary_len: usize) {
            self.completed_len.store(summary_len, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_analysis_start();
        cb.on_extract_complete(5);
        cb.on_classify_complete(2, 3);
        cb.on_summarize_start();
        cb.on_analysis_complete(42);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            extracted: AtomicUsize::new(0),
            questions: AtomicUsize::new(0),
            answers: AtomicUsize::new(0),
            summarize_starts: AtomicUsize::new(0),
            completed_len: AtomicUsize::new(0),
        };

        tracker.on_analysis_start();
        tracker.on_extract_complete(7);
        tracker.on_classify_complete(3, 4);
        tracker.on_summarize_start();
        tracker.on_analysis_complete(128);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.extracted.load(Ordering::SeqCst), 7);
        assert_eq!(tracker.questions.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.answers.load(Ordering::SeqCst), 4);
        assert_eq!(tracker.summarize_starts.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.completed_len.load(Ordering::SeqCst), 128);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn AnalysisProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_analysis_start();
        cb.on_extract_complete(10);
        cb.on_analysis_complete(512);
    }
}
