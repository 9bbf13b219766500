//! Pipeline stages for transcript analysis.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different summarization backend) without
//! touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ classify ──▶ summarize
//! (URL/path)  (docx-rs)  (Q/A split)  (Azure job)
//! ```
//!
//! 1. [`input`]    — canonicalise the user-supplied path or URL to `.docx` bytes
//! 2. [`extract`]  — parse the document tree and collect trimmed non-empty
//!    paragraph lines in document order
//! 3. [`classify`] — partition the lines into questions and answers with the
//!    fixed string-matching heuristic; the only stage with branching logic
//! 4. [`summarize`] — drive the remote summarization call and convert every
//!    failure into a displayable string; the only stage with network I/O

pub mod classify;
pub mod extract;
pub mod input;
pub mod summarize;
