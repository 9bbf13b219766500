//! Output types returned by the analysis entry points.

use serde::{Deserialize, Serialize};

/// The result of a full transcript analysis.
///
/// The three string fields are exactly the three panes the presentation
/// layer renders and exports: the export files are byte-identical to these
/// strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// Newline-joined question lines, in document order.
    pub questions: String,
    /// Newline-joined answer lines, in document order.
    pub answers: String,
    /// The abstractive summary of the answers, or a displayable placeholder
    /// or error string when the remote call could not produce one.
    pub summary: String,
    /// Timing and count statistics for the run.
    pub stats: AnalysisStats,
}

/// Statistics about an analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Non-empty paragraphs extracted from the document.
    pub total_lines: usize,
    /// Lines classified as questions.
    pub question_lines: usize,
    /// Lines classified as answers.
    pub answer_lines: usize,
    /// Byte length of the summary pane.
    pub summary_chars: usize,
    /// Time spent resolving input and extracting text.
    pub extract_duration_ms: u64,
    /// Time spent in the remote summarization call (zero when skipped).
    pub summarize_duration_ms: u64,
    /// Wall-clock time of the whole run.
    pub total_duration_ms: u64,
}

/// Lightweight document facts from [`crate::inspect`].
///
/// Produced without credentials or any remote call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Non-empty paragraphs in the document.
    pub paragraph_count: usize,
    /// Paragraphs the classifier would treat as questions.
    pub question_count: usize,
    /// Paragraphs the classifier would treat as answers.
    pub answer_count: usize,
    /// Total characters across the extracted paragraphs.
    pub char_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_round_trips_through_json() {
        let output = AnalysisOutput {
            questions: "Is this on?".into(),
            answers: "Yes.".into(),
            summary: "It is on.".into(),
            stats: AnalysisStats {
                total_lines: 2,
                question_lines: 1,
                answer_lines: 1,
                summary_chars: 9,
                extract_duration_ms: 3,
                summarize_duration_ms: 1200,
                total_duration_ms: 1210,
            },
        };

        let json = serde_json::to_string(&output).expect("serialize");
        let back: AnalysisOutput = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.questions, output.questions);
        assert_eq!(back.stats.total_lines, 2);
    }
}
