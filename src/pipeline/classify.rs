//! Question/answer classification: partition lines into two ordered panes.
//!
//! The rule is a fixed string-matching heuristic applied independently per
//! line, with no lookahead, no cross-line context, and no case folding. A
//! line is a question iff any of the three conditions holds; since all three
//! route to the same side, they collapse to a single boolean OR. Matched
//! lines are kept verbatim, marker included.
//!
//! Known limitation, kept deliberately: an answer that happens to contain a
//! literal `?` at its end or the substring `Question:` in quoted text will be
//! routed to the questions pane.

use serde::{Deserialize, Serialize};

/// The ordered partition of a document's lines into questions and answers.
///
/// Each pane is the newline-joined text the presentation layer renders and
/// exports. `question_count + answer_count` always equals the number of
/// input lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaSplit {
    /// Newline-joined question lines, in document order.
    pub questions: String,
    /// Newline-joined answer lines, in document order.
    pub answers: String,
    /// Number of lines routed to the questions pane.
    pub question_count: usize,
    /// Number of lines routed to the answers pane.
    pub answer_count: usize,
}

/// Decide whether a single line is a question.
///
/// True iff the line ends with `?`, contains `User A:`, or contains
/// `Question:`. Case-sensitive, total, and stateless.
pub fn is_question(line: &str) -> bool {
    line.ends_with('?') || line.contains("User A:") || line.contains("Question:")
}

/// Partition `lines` into questions and answers, preserving relative order
/// within each pane.
///
/// An empty input yields two empty panes, not an error.
pub fn split_lines<S: AsRef<str>>(lines: &[S]) -> QaSplit {
    let mut questions: Vec<&str> = Vec::new();
    let mut answers: Vec<&str> = Vec::new();

    for line in lines {
        let line = line.as_ref();
        if is_question(line) {
            questions.push(line);
        } else {
            answers.push(line);
        }
    }

    QaSplit {
        question_count: questions.len(),
        answer_count: answers.len(),
        questions: questions.join("\n"),
        answers: answers.join("\n"),
    }
}
