//! Conversion entry points.
//!
//! The pipeline is strictly sequential at the stage level: fetch metadata,
//! fetch images, assemble the PDF, optionally clean up staged files. Each
//! stage consumes the previous stage's output and nothing is shared beyond
//! that — see [`crate::pipeline`] for the stage contracts.

use crate::config::ConversionConfig;
use crate::error::Resume2PdfError;
use crate::meta::ResumeMetadata;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::{assemble, fetch, metadata};
use crate::urls::{CacheBuster, SecureId};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Convert a resume to a PDF at `output_path`.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Any stage failure aborts the run; no PDF is written unless every page
/// was fetched and drawn. Staged image files from a failed run are left in
/// the temp directory.
pub async fn convert(
    sid: &SecureId,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Resume2PdfError> {
    let total_start = Instant::now();
    let output_path = output_path.as_ref();
    info!("Starting conversion of resume {}", sid);

    // ── Step 1: Optional clobber guard (default is to overwrite) ─────────
    if output_path.exists() && !config.overwrite {
        return Err(Resume2PdfError::OutputExists {
            path: output_path.to_path_buf(),
        });
    }

    let client = build_client(config)?;
    let buster = CacheBuster::new();

    // ── Step 2: Metadata ─────────────────────────────────────────────────
    let resume_meta = metadata::fetch_metadata(&client, sid, config, &buster).await?;
    if resume_meta.pages.is_empty() {
        return Err(Resume2PdfError::NoPages);
    }
    let page_count = resume_meta.page_count();

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(page_count);
    }

    // ── Step 3: Images ───────────────────────────────────────────────────
    let fetch_start = Instant::now();
    let staged = fetch::fetch_images(&client, sid, page_count, config, &buster).await?;
    let fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;
    debug!("Fetch phase took {}ms", fetch_duration_ms);

    // ── Step 4: Assemble ─────────────────────────────────────────────────
    let assemble_start = Instant::now();
    assemble::assemble_pdf(&resume_meta, staged.paths(), output_path, config).await?;
    let assemble_duration_ms = assemble_start.elapsed().as_millis() as u64;
    debug!("Assemble phase took {}ms", assemble_duration_ms);

    // ── Step 5: Cleanup (only after a successful save) ───────────────────
    let bytes_fetched = staged.total_bytes();
    let staged_images = if config.keep_images {
        staged.into_paths()
    } else {
        let removed = staged.cleanup();
        debug!("Removed {} staged images", removed);
        Vec::new()
    };

    let stats = ConversionStats {
        page_count,
        bytes_fetched,
        fetch_duration_ms,
        assemble_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Resume stored to {} ({} pages, {}ms)",
        output_path.display(),
        page_count,
        stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(page_count);
    }

    Ok(ConversionOutput {
        pdf_path: output_path.to_path_buf(),
        metadata: resume_meta,
        staged_images,
        stats,
    })
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    sid: &SecureId,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Resume2PdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Resume2PdfError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(sid, output_path, config))
}

/// Fetch and return the resume metadata without downloading any images.
pub async fn inspect(
    sid: &SecureId,
    config: &ConversionConfig,
) -> Result<ResumeMetadata, Resume2PdfError> {
    let client = build_client(config)?;
    let buster = CacheBuster::new();
    metadata::fetch_metadata(&client, sid, config, &buster).await
}

/// Shared HTTP client with the per-request timeout applied.
fn build_client(config: &ConversionConfig) -> Result<reqwest::Client, Resume2PdfError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| Resume2PdfError::Internal(format!("Failed to build HTTP client: {e}")))
}
