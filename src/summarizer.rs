//! The summarization seam: a narrow trait plus the Azure AI Language client.
//!
//! Everything above this module treats summarization as "submit text, get
//! summary fragments or an error". The [`Summarizer`] trait is that boundary:
//! [`AzureLanguageClient`] implements it over the real REST API, and tests
//! implement it with canned doubles so the pipeline and the CLI never need a
//! live network connection.
//!
//! ## Wire protocol
//!
//! Azure abstractive summarization is a long-running operation:
//!
//! 1. `POST {endpoint}/language/analyze-text/jobs?api-version=2023-04-01`
//!    with an `AbstractiveSummarization` task → `202 Accepted` plus an
//!    `operation-location` header.
//! 2. `GET` that URL until the job status reaches `succeeded` or `failed`,
//!    sleeping [`AzureLanguageClient::with_poll_interval_ms`] between polls.
//! 3. Read the summary fragments (or the document-level error) from the
//!    task results.
//!
//! The resource key is forwarded verbatim in the `Ocp-Apim-Subscription-Key`
//! header; no validation is applied to either credential. There is no retry
//! on failure — callers get exactly one job per call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info};

const API_VERSION: &str = "2023-04-01";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Errors from a single summarization call.
///
/// These never cross the `analyze` boundary as an `Err`:
/// [`crate::pipeline::summarize::summarize_answers`] converts every variant
/// into a displayable summary string.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Transport-level failure (connection, TLS, request timeout, decode).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service refused the job submission.
    #[error("Summarization job was rejected: HTTP {status}: {body}")]
    JobRejected { status: u16, body: String },

    /// The submission response carried no `operation-location` header.
    #[error("Service response is missing the operation-location header")]
    MissingOperationLocation,

    /// The job finished but its payload did not have the expected shape.
    #[error("Malformed service response: {detail}")]
    MalformedResponse { detail: String },

    /// The job reached a terminal `failed` or `cancelled` status.
    #[error("Summarization job failed: {message}")]
    JobFailed { message: String },

    /// The service reported a document-level error for the submitted text.
    ///
    /// Distinguished from [`SummarizeError::JobFailed`] because the summary
    /// policy renders it with the service-error prefix rather than the
    /// generic one.
    #[error("document-level service error: {message}")]
    DocumentError { message: String },

    /// The job did not reach a terminal status within the deadline.
    #[error("Summarization job did not complete within {secs}s")]
    PollTimeout { secs: u64 },
}

/// Submit text, receive abstractive-summary fragments.
///
/// Implementations must be `Send + Sync` so a client can be shared across
/// calls. The input is guaranteed non-empty by the caller
/// ([`crate::pipeline::summarize::summarize_answers`] short-circuits
/// whitespace-only input before reaching this trait).
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`, returning the ordered summary fragments.
    ///
    /// An `Ok` with zero fragments means the service completed the job but
    /// produced no summary.
    async fn summarize(&self, text: &str) -> Result<Vec<String>, SummarizeError>;
}

// ── Azure client ─────────────────────────────────────────────────────────

/// Azure AI Language client for abstractive summarization.
///
/// Construct with [`AzureLanguageClient::new`] and adjust the knobs with the
/// `with_*` methods; the defaults match [`crate::config::AnalysisConfig`].
pub struct AzureLanguageClient {
    endpoint: String,
    api_key: String,
    language: String,
    sentence_count: Option<u32>,
    poll_interval: Duration,
    timeout_secs: u64,
    http: reqwest::Client,
}

impl AzureLanguageClient {
    /// Create a client for the given endpoint and resource key.
    ///
    /// Both strings are forwarded verbatim; a wrong key surfaces as an HTTP
    /// 401 when the first job is submitted, not here.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, SummarizeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            language: "en".to_string(),
            sentence_count: None,
            poll_interval: Duration::from_millis(1000),
            timeout_secs: 120,
            http,
        })
    }

    /// BCP-47 language tag sent with the document. Default: `"en"`.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Requested summary length in sentences; `None` uses the service default.
    pub fn with_sentence_count(mut self, n: Option<u32>) -> Self {
        self.sentence_count = n;
        self
    }

    /// Delay between polls of the job status endpoint.
    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval = Duration::from_millis(ms.max(100));
        self
    }

    /// Overall deadline for the job, in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }

    fn jobs_url(&self) -> String {
        format!(
            "{}/language/analyze-text/jobs?api-version={API_VERSION}",
            self.endpoint.trim_end_matches('/')
        )
    }

    /// Submit the job and return the URL to poll for its status.
    async fn submit(&self, text: &str) -> Result<String, SummarizeError> {
        let body = AnalyzeTextJob {
            display_name: "convoqa answer summarization",
            analysis_input: AnalysisInput {
                documents: vec![InputDocument {
                    id: "1",
                    language: &self.language,
                    text,
                }],
            },
            tasks: vec![SummaryTask {
                kind: "AbstractiveSummarization",
                task_name: "answers",
                parameters: SummaryParameters {
                    sentence_count: self.sentence_count,
                },
            }],
        };

        let response = self
            .http
            .post(self.jobs_url())
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::JobRejected { status, body });
        }

        let operation_url = response
            .headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(SummarizeError::MissingOperationLocation)?;

        debug!("Summarization job accepted: {operation_url}");
        Ok(operation_url)
    }

    /// Poll the job until it reaches a terminal status or the deadline.
    async fn poll(&self, operation_url: &str) -> Result<JobStatus, SummarizeError> {
        let deadline = Instant::now() + Duration::from_secs(self.timeout_secs);

        loop {
            let job: JobStatus = self
                .http
                .get(operation_url)
                .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            match job.status.as_str() {
                "succeeded" => return Ok(job),
                "failed" | "cancelled" => {
                    let message = job
                        .errors
                        .first()
                        .map(|e| {
                            if e.code.is_empty() {
                                e.message.clone()
                            } else {
                                format!("{} ({})", e.message, e.code)
                            }
                        })
                        .unwrap_or_else(|| format!("job status '{}'", job.status));
                    return Err(SummarizeError::JobFailed { message });
                }
                other => {
                    debug!("Summarization job status: {other}");
                    if Instant::now() >= deadline {
                        return Err(SummarizeError::PollTimeout {
                            secs: self.timeout_secs,
                        });
                    }
                    sleep(self.poll_interval).await;
                }
            }
        }
    }
}

#[async_trait]
impl Summarizer for AzureLanguageClient {
    async fn summarize(&self, text: &str) -> Result<Vec<String>, SummarizeError> {
        info!("Submitting abstractive summarization job ({} chars)", text.len());
        let operation_url = self.submit(text).await?;
        let job = self.poll(&operation_url).await?;
        let fragments = collect_fragments(job)?;
        info!("Summarization job returned {} fragments", fragments.len());
        Ok(fragments)
    }
}

/// Extract the summary fragments from a terminal `succeeded` job payload.
///
/// A document-level error in the task results takes precedence over any
/// fragments from other documents (only one document is ever submitted).
fn collect_fragments(job: JobStatus) -> Result<Vec<String>, SummarizeError> {
    let task = job
        .tasks
        .items
        .into_iter()
        .next()
        .ok_or_else(|| SummarizeError::MalformedResponse {
            detail: "job succeeded but carried no task results".to_string(),
        })?;

    let results = task.results.unwrap_or_default();

    if let Some(doc_error) = results.errors.into_iter().next() {
        return Err(SummarizeError::DocumentError {
            message: doc_error.error.message,
        });
    }

    Ok(results
        .documents
        .into_iter()
        .flat_map(|d| d.summaries.into_iter().map(|s| s.text))
        .collect())
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeTextJob<'a> {
    display_name: &'a str,
    analysis_input: AnalysisInput<'a>,
    tasks: Vec<SummaryTask<'a>>,
}

#[derive(Debug, Serialize)]
struct AnalysisInput<'a> {
    documents: Vec<InputDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct InputDocument<'a> {
    id: &'a str,
    language: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryTask<'a> {
    kind: &'a str,
    task_name: &'a str,
    parameters: SummaryParameters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    sentence_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    status: String,
    #[serde(default)]
    errors: Vec<ServiceError>,
    #[serde(default)]
    tasks: TaskList,
}

#[derive(Debug, Default, Deserialize)]
struct TaskList {
    #[serde(default)]
    items: Vec<TaskResult>,
}

#[derive(Debug, Deserialize)]
struct TaskResult {
    #[serde(default)]
    results: Option<TaskResults>,
}

#[derive(Debug, Default, Deserialize)]
struct TaskResults {
    #[serde(default)]
    documents: Vec<SummaryDocument>,
    #[serde(default)]
    errors: Vec<DocumentErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct SummaryDocument {
    #[serde(default)]
    summaries: Vec<SummaryFragment>,
}

#[derive(Debug, Deserialize)]
struct SummaryFragment {
    text: String,
}

#[derive(Debug, Deserialize)]
struct DocumentErrorEntry {
    error: ServiceError,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: String,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_body_serializes_camel_case() {
        let body = AnalyzeTextJob {
            display_name: "convoqa answer summarization",
            analysis_input: AnalysisInput {
                documents: vec![InputDocument {
                    id: "1",
                    language: "en",
                    text: "hello",
                }],
            },
            tasks: vec![SummaryTask {
                kind: "AbstractiveSummarization",
                task_name: "answers",
                parameters: SummaryParameters {
                    sentence_count: Some(3),
                },
            }],
        };

        let json = serde_json::to_string(&body).expect("serialize");
        assert!(json.contains("\"analysisInput\""), "got: {json}");
        assert!(json.contains("\"displayName\""), "got: {json}");
        assert!(json.contains("\"taskName\""), "got: {json}");
        assert!(json.contains("\"sentenceCount\":3"), "got: {json}");
        assert!(json.contains("\"kind\":\"AbstractiveSummarization\""), "got: {json}");
    }

    #[test]
    fn job_body_omits_absent_sentence_count() {
        let params = SummaryParameters {
            sentence_count: None,
        };
        let json = serde_json::to_string(&params).expect("serialize");
        assert_eq!(json, "{}");
    }

    #[test]
    fn collect_fragments_from_succeeded_job() {
        let job: JobStatus = serde_json::from_str(
            r#"{
                "jobId": "abc",
                "status": "succeeded",
                "tasks": {
                    "completed": 1,
                    "items": [{
                        "kind": "AbstractiveSummarizationLROResults",
                        "status": "succeeded",
                        "results": {
                            "documents": [{
                                "id": "1",
                                "summaries": [
                                    {"text": "First part."},
                                    {"text": "Second part."}
                                ],
                                "warnings": []
                            }],
                            "errors": [],
                            "modelVersion": "latest"
                        }
                    }]
                }
            }"#,
        )
        .expect("parse");

        let fragments = collect_fragments(job).expect("fragments");
        assert_eq!(fragments, vec!["First part.", "Second part."]);
    }

    #[test]
    fn collect_fragments_surfaces_document_error() {
        let job: JobStatus = serde_json::from_str(
            r#"{
                "status": "succeeded",
                "tasks": {
                    "items": [{
                        "results": {
                            "documents": [],
                            "errors": [{
                                "id": "1",
                                "error": {"code": "InvalidRequest", "message": "rate limited"}
                            }]
                        }
                    }]
                }
            }"#,
        )
        .expect("parse");

        match collect_fragments(job) {
            Err(SummarizeError::DocumentError { message }) => {
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected DocumentError, got {other:?}"),
        }
    }

    #[test]
    fn collect_fragments_rejects_empty_task_list() {
        let job: JobStatus =
            serde_json::from_str(r#"{"status": "succeeded", "tasks": {"items": []}}"#)
                .expect("parse");
        assert!(matches!(
            collect_fragments(job),
            Err(SummarizeError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn failed_job_parses_top_level_errors() {
        let job: JobStatus = serde_json::from_str(
            r#"{"status": "failed", "errors": [{"code": "InternalServerError", "message": "boom"}]}"#,
        )
        .expect("parse");
        assert_eq!(job.status, "failed");
        assert_eq!(job.errors[0].message, "boom");
        assert_eq!(job.errors[0].code, "InternalServerError");
    }
}
