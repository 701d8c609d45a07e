//! CLI binary for resumeio2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use resumeio2pdf::{
    convert, inspect, ConversionConfig, ConversionProgressCallback, ImageFormat, ProgressCallback,
    SecureId,
};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
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

/// Terminal progress callback: renders a live progress bar and per-page log
/// lines using [indicatif]. Works correctly when pages finish out of order
/// (concurrent downloads).
struct CliProgressCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
    /// Per-page wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<usize, Instant>>,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set dynamically by
    /// `on_conversion_start` (called once the metadata is in).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_conversion_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Fetching metadata…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
        })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>2}/{len} pages  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_pages as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Downloading");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Resume has {total_pages} pages"))
        ));
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        self.start_times
            .lock()
            .unwrap()
            .insert(page_num, Instant::now());
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_fetched(&self, page_num: usize, total: usize, bytes: usize) {
        let elapsed_ms = self
            .start_times
            .lock()
            .unwrap()
            .remove(&page_num)
            .map(|t| t.elapsed().as_millis())
            .unwrap_or(0);

        self.bar.println(format!(
            "  {} Page {:>2}/{:<2}  {:<10}  {}",
            green("✓"),
            page_num,
            total,
            dim(&format!("{:>6} KiB", bytes / 1024)),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_page_assembled(&self, page_num: usize, total: usize) {
        self.bar.set_prefix("Assembling");
        self.bar.set_message(format!("page {page_num}/{total}"));
    }

    fn on_page_error(&self, page_num: usize, total: usize, error: String) {
        self.bar.println(format!(
            "  {} Page {:>2}/{:<2}  {}",
            red("✗"),
            page_num,
            total,
            red(&error),
        ));
    }

    fn on_conversion_complete(&self, _total_pages: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Download by SecureID (the token in https://resume.io/r/<SecureID>)
  resumeio2pdf --sid AbC123

  # Choose the output file; refuse to replace it if it already exists
  resumeio2pdf --sid AbC123 -o resume.pdf --no-overwrite

  # JPEG screenshots, smaller size, delete staged images afterwards
  resumeio2pdf --sid AbC123 --format jpeg --size 900 --clean

  # Print the page metadata only, no images downloaded
  resumeio2pdf --sid AbC123 --inspect-only

EXIT CODES:
  0  success (or --version / --help)
  1  runtime failure (network, HTTP status, file system)
  2  missing or malformed command-line arguments

NOTES:
  Screenshot files are staged in the system temp directory and kept after a
  successful run; pass --clean to delete them. Nothing is retried — a non-200
  answer or a timeout on any page aborts the run and no PDF is written.
  Repeat runs replace the previous output file; pass --no-overwrite to fail
  instead when the output already exists.
"#;

/// Download a resume.io resume as a PDF.
#[derive(Parser, Debug)]
#[command(
    name = "resumeio2pdf",
    version = "version 1.0",
    about = "Download the page screenshots of a resume.io resume and assemble them into a PDF",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// SecureID of the resume (the token in https://resume.io/r/<SecureID>).
    #[arg(short, long, env = "RESUMEIO2PDF_SID")]
    sid: String,

    /// Public link to the resume. Informational only — the SecureID still
    /// comes from --sid.
    #[arg(long, env = "RESUMEIO2PDF_URL")]
    url: Option<String>,

    /// Write the PDF here instead of ./{sid}.pdf.
    #[arg(short, long, env = "RESUMEIO2PDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Fail instead of replacing an existing output file.
    #[arg(long, env = "RESUMEIO2PDF_NO_OVERWRITE")]
    no_overwrite: bool,

    /// Screenshot format to request.
    #[arg(long, env = "RESUMEIO2PDF_FORMAT", value_enum, default_value = "png")]
    format: FormatArg,

    /// Requested screenshot size in pixels (longest edge).
    #[arg(long, env = "RESUMEIO2PDF_SIZE", default_value_t = 1800)]
    size: u32,

    /// Per-request timeout in seconds.
    #[arg(long, env = "RESUMEIO2PDF_TIMEOUT", default_value_t = 60)]
    timeout: u64,

    /// Number of concurrent page downloads.
    #[arg(short, long, env = "RESUMEIO2PDF_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Delete staged screenshot files after a successful conversion.
    #[arg(long, env = "RESUMEIO2PDF_CLEAN")]
    clean: bool,

    /// Print the page metadata as JSON and exit, no images downloaded.
    #[arg(long)]
    inspect_only: bool,

    /// Output a JSON run summary instead of human-readable text.
    #[arg(long, env = "RESUMEIO2PDF_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "RESUMEIO2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUMEIO2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "RESUMEIO2PDF_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Png,
    Jpeg,
}

impl From<FormatArg> for ImageFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Jpeg => ImageFormat::Jpeg,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active; the
    // bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
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

    let sid = SecureId::new(cli.sid.as_str())?;
    info!("SecureID: {}", sid);

    // The link is accepted and validated but never used to derive the
    // identifier; --sid stays authoritative.
    if let Some(ref url) = cli.url {
        let linked = SecureId::from_url(url)?;
        if linked.as_str() != sid.as_str() {
            warn!(
                "Link {} carries SecureID '{}', which differs from --sid '{}'",
                url, linked, sid
            );
        }
        info!("URL: {}", url);
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let mut builder = ConversionConfig::builder()
        .image_format(cli.format.into())
        .image_size(cli.size)
        .timeout_secs(cli.timeout)
        .concurrency(cli.concurrency)
        .keep_images(!cli.clean)
        .overwrite(!cli.no_overwrite);
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&sid, &config)
            .await
            .context("Failed to fetch resume metadata")?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&meta)?);
        } else {
            println!("SecureID:  {}", sid);
            println!("Pages:     {}", meta.page_count());
            for (i, page) in meta.pages.iter().enumerate() {
                println!(
                    "  Page {:>2}:  {} × {} px",
                    i + 1,
                    page.viewport.width,
                    page.viewport.height
                );
            }
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{sid}.pdf")));

    let result = convert(&sid, &output_path, &config)
        .await
        .context("Conversion failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !cli.quiet {
        eprintln!(
            "{} Resume stored to {}  {}",
            green("✔"),
            bold(&result.pdf_path.display().to_string()),
            dim(&format!(
                "({} pages, {} KiB fetched, {}ms)",
                result.stats.page_count,
                result.stats.bytes_fetched / 1024,
                result.stats.total_duration_ms
            )),
        );
    }

    Ok(())
}
