//! Configuration types for transcript analysis.
//!
//! All analysis behaviour is controlled through [`AnalysisConfig`], built via
//! its [`AnalysisConfigBuilder`]. Keeping every knob in one struct keeps the
//! credentials session-scoped: they are passed into each `analyze` call
//! rather than living in ambient globals or environment reads scattered
//! through the pipeline.

use crate::error::AnalyzeError;
use crate::progress::ProgressCallback;
use crate::summarizer::Summarizer;
use std::fmt;
use std::sync::Arc;

/// Configuration for a transcript analysis run.
///
/// Built via [`AnalysisConfig::builder()`] or using
/// [`AnalysisConfig::default()`].
///
/// # Example
/// ```rust
/// use convoqa::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .endpoint("https://my-resource.cognitiveservices.azure.com")
///     .api_key("secret")
///     .sentence_count(3)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Azure AI Language endpoint URL, e.g.
    /// `https://<resource>.cognitiveservices.azure.com`.
    ///
    /// If `None`, the `AZURE_LANGUAGE_ENDPOINT` environment variable is
    /// consulted when the summarizer is resolved.
    pub endpoint: Option<String>,

    /// Azure AI Language resource key, forwarded verbatim in the
    /// `Ocp-Apim-Subscription-Key` header. No format validation is applied.
    ///
    /// If `None`, the `AZURE_LANGUAGE_KEY` environment variable is consulted
    /// when the summarizer is resolved. Masked in the `Debug` output.
    pub api_key: Option<String>,

    /// BCP-47 language tag sent with the document. Default: `"en"`.
    pub language: String,

    /// Requested number of summary sentences (Azure accepts 1–20).
    /// If `None`, the service default is used.
    pub sentence_count: Option<u32>,

    /// Delay between polls of the long-running summarization job, in
    /// milliseconds. Default: 1000. Values below 100 are clamped up by the
    /// builder so a misconfigured caller cannot hammer the status endpoint.
    pub poll_interval_ms: u64,

    /// Overall deadline for the summarization job in seconds. Default: 120.
    ///
    /// Azure abstractive summarization is a long-running operation; most
    /// jobs finish within a few seconds, but a stuck job would otherwise
    /// block the caller forever. Hitting the deadline surfaces as a
    /// `PollTimeout`, which the summary policy renders as an error string.
    pub api_timeout_secs: u64,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Pre-constructed summarizer. Takes precedence over `endpoint`/`api_key`.
    ///
    /// This is the test seam: inject a double returning canned fragments and
    /// the whole pipeline runs without any network dependency.
    pub summarizer: Option<Arc<dyn Summarizer>>,

    /// Optional progress callback receiving per-stage events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            language: "en".to_string(),
            sentence_count: None,
            poll_interval_ms: 1000,
            api_timeout_secs: 120,
            download_timeout_secs: 120,
            summarizer: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "********"))
            .field("language", &self.language)
            .field("sentence_count", &self.sentence_count)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("summarizer", &self.summarizer.as_ref().map(|_| "<dyn Summarizer>"))
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = Some(endpoint.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = language.into();
        self
    }

    pub fn sentence_count(mut self, n: u32) -> Self {
        self.config.sentence_count = Some(n);
        self
    }

    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms.max(100);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.config.summarizer = Some(summarizer);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, AnalyzeError> {
        let c = &self.config;
        if let Some(n) = c.sentence_count {
            if !(1..=20).contains(&n) {
                return Err(AnalyzeError::InvalidConfig(format!(
                    "sentence_count must be 1–20, got {n}"
                )));
            }
        }
        if let Some(ref ep) = c.endpoint {
            if !ep.starts_with("http://") && !ep.starts_with("https://") {
                return Err(AnalyzeError::InvalidConfig(format!(
                    "endpoint must be an HTTP/HTTPS URL, got '{ep}'"
                )));
            }
        }
        Ok(self.config)
    }
}
