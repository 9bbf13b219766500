//! CLI binary for convoqa.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AnalysisConfig`, renders the three result panes, and writes the exports.

use anyhow::{Context, Result};
use clap::Parser;
use convoqa::{
    analyze, analyze_to_files, inspect, AnalysisConfig, AnalysisProgressCallback,
    ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a single spinner whose message tracks the
/// pipeline stage, with per-stage log lines printed above it.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl AnalysisProgressCallback for CliProgressCallback {
    fn on_analysis_start(&self) {
        self.bar.set_message("Reading document…");
    }

    fn on_extract_complete(&self, line_count: usize) {
        self.bar.println(format!(
            "  {} {} paragraphs extracted",
            green("✓"),
            bold(&line_count.to_string())
        ));
        self.bar.set_message("Splitting questions from answers…");
    }

    fn on_classify_complete(&self, question_count: usize, answer_count: usize) {
        self.bar.println(format!(
            "  {} {} questions / {} answers",
            green("✓"),
            bold(&question_count.to_string()),
            bold(&answer_count.to_string())
        ));
    }

    fn on_summarize_start(&self) {
        self.bar
            .set_message("Azure AI is analyzing your conversation…");
    }

    fn on_analysis_complete(&self, _summary_len: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Analyze a transcript (panes to stdout)
  convoqa transcript.docx --key <KEY> --endpoint https://<res>.cognitiveservices.azure.com

  # Credentials from the environment
  export AZURE_LANGUAGE_KEY=...
  export AZURE_LANGUAGE_ENDPOINT=https://<res>.cognitiveservices.azure.com
  convoqa transcript.docx

  # Write questions.txt / answers.txt / summary_final.txt
  convoqa transcript.docx -o ./out

  # Shorter summary, structured output
  convoqa --sentence-count 2 --json transcript.docx > result.json

  # Analyze a document from a URL
  convoqa https://example.com/interview.docx

  # Count paragraphs/questions/answers only (no credentials needed)
  convoqa --inspect-only transcript.docx

ENVIRONMENT VARIABLES:
  AZURE_LANGUAGE_KEY        Azure AI Language resource key
  AZURE_LANGUAGE_ENDPOINT   Azure AI Language endpoint URL
  CONVOQA_OUTPUT_DIR        Default export directory
  CONVOQA_LANGUAGE          Document language tag (default: en)

SETUP:
  1. Create an Azure AI Language resource in the Azure Portal.
  2. Copy its key and endpoint from "Keys and Endpoint".
  3. convoqa transcript.docx --key <KEY> --endpoint <URL>
"#;

/// Split conversation transcripts into questions and answers and summarize
/// the answers with Azure AI Language.
#[derive(Parser, Debug)]
#[command(
    name = "convoqa",
    version,
    about = "Split .docx conversation transcripts into questions and answers and summarize the answers",
    long_about = "Extract the paragraph lines of a .docx conversation transcript, split them into \
questions and answers (lines ending in '?' or carrying a 'User A:' / 'Question:' marker are \
questions), and summarize the answers with the Azure AI Language abstractive-summarization \
service.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local .docx file path or HTTP/HTTPS URL.
    input: String,

    /// Write questions.txt, answers.txt, and summary_final.txt into this directory.
    #[arg(short = 'o', long, env = "CONVOQA_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Azure AI Language resource key.
    #[arg(long, env = "AZURE_LANGUAGE_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Azure AI Language endpoint URL.
    #[arg(long, env = "AZURE_LANGUAGE_ENDPOINT")]
    endpoint: Option<String>,

    /// Document language tag sent to the service.
    #[arg(long, env = "CONVOQA_LANGUAGE", default_value = "en")]
    language: String,

    /// Requested summary length in sentences (1-20, service default if unset).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=20))]
    sentence_count: Option<u32>,

    /// Delay between polls of the summarization job, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    poll_interval_ms: u64,

    /// Overall deadline for the summarization job in seconds.
    #[arg(long, default_value_t = 120)]
    api_timeout: u64,

    /// HTTP download timeout in seconds (URL inputs).
    #[arg(long, default_value_t = 120)]
    download_timeout: u64,

    /// Output structured JSON instead of the text panes.
    #[arg(long)]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long)]
    no_progress: bool,

    /// Print paragraph/question/answer counts only, no summarization.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and the panes.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode (no credentials needed) ────────────────────────
    if cli.inspect_only {
        let info = inspect(&cli.input)
            .await
            .context("Failed to inspect document")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialize document info")?
            );
        } else {
            println!("File:        {}", cli.input);
            println!("Paragraphs:  {}", info.paragraph_count);
            println!("Questions:   {}", info.question_count);
            println!("Answers:     {}", info.answer_count);
            println!("Characters:  {}", info.char_count);
        }
        return Ok(());
    }

    // ── Credential gating — distinct advisory per missing piece ──────────
    if cli.key.as_deref().map_or(true, str::is_empty) {
        eprintln!(
            "{} Azure Language key missing. Pass --key or set AZURE_LANGUAGE_KEY.",
            yellow("⚠")
        );
        std::process::exit(2);
    }
    if cli.endpoint.as_deref().map_or(true, str::is_empty) {
        eprintln!(
            "{} Azure Language endpoint missing. Pass --endpoint or set AZURE_LANGUAGE_ENDPOINT.",
            yellow("⚠")
        );
        std::process::exit(2);
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn AnalysisProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run analysis ─────────────────────────────────────────────────────
    if let Some(ref out_dir) = cli.output_dir {
        let output = analyze_to_files(&cli.input, out_dir, &config)
            .await
            .context("Critical error during analysis")?;

        if !cli.quiet {
            eprintln!(
                "{}  {} questions / {} answers  {}ms  →  {}",
                green("✔"),
                output.stats.question_lines,
                output.stats.answer_lines,
                output.stats.total_duration_ms,
                bold(&out_dir.display().to_string()),
            );
            eprintln!(
                "   {}",
                dim("questions.txt  answers.txt  summary_final.txt")
            );
        }
    } else {
        let output = analyze(&cli.input, &config)
            .await
            .context("Critical error during analysis")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            render_panes(&mut handle, &output.questions, &output.answers, &output.summary)
                .context("Failed to write to stdout")?;
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "   {}",
                dim(&format!(
                    "{} lines analyzed in {}ms",
                    output.stats.total_lines, output.stats.total_duration_ms
                ))
            );
        }
    }

    Ok(())
}

/// Render the three panes in document order: questions, answers, summary.
fn render_panes(
    w: &mut impl Write,
    questions: &str,
    answers: &str,
    summary: &str,
) -> io::Result<()> {
    writeln!(w, "{}", cyan(&bold("Extracted Questions")))?;
    writeln!(w, "{questions}")?;
    writeln!(w)?;
    writeln!(w, "{}", cyan(&bold("Extracted Answers")))?;
    writeln!(w, "{answers}")?;
    writeln!(w)?;
    writeln!(w, "{}", cyan(&bold("AI-Generated Summary of Answers")))?;
    writeln!(w, "{summary}")?;
    Ok(())
}

/// Map CLI args to `AnalysisConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<AnalysisConfig> {
    let mut builder = AnalysisConfig::builder()
        .language(&cli.language)
        .poll_interval_ms(cli.poll_interval_ms)
        .api_timeout_secs(cli.api_timeout)
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref key) = cli.key {
        builder = builder.api_key(key);
    }
    if let Some(ref endpoint) = cli.endpoint {
        builder = builder.endpoint(endpoint);
    }
    if let Some(n) = cli.sentence_count {
        builder = builder.sentence_count(n);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
