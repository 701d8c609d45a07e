//! Image fetching: one screenshot per page, staged to temporary files.
//!
//! Pages are requested in index order with distinct cache-busting values;
//! downloads may overlap up to the configured concurrency. The result is
//! re-sorted by page index before returning, so the staged sequence is
//! always aligned 1:1 with the metadata pages regardless of completion
//! order.
//!
//! Failure policy is all-or-nothing: the first non-200 page aborts the
//! whole run. Files already staged for earlier pages are deliberately not
//! removed in that path — they are cheap, and leaving them makes a partial
//! failure inspectable.

use crate::config::{ConversionConfig, ImageFormat};
use crate::error::Resume2PdfError;
use crate::pipeline::metadata::request_error;
use crate::urls::{image_url, CacheBuster, SecureId};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ordered staged screenshot files, index-aligned with the metadata pages.
///
/// The path at index i holds the screenshot of page i+1. Staged files live
/// in the system temp directory and survive the conversion unless cleanup
/// is requested via [`StagedImages::cleanup`].
#[derive(Debug)]
pub struct StagedImages {
    paths: Vec<PathBuf>,
    total_bytes: u64,
}

impl StagedImages {
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Total bytes downloaded across all pages.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }

    /// Delete the staged files that still exist; returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let mut removed = 0;
        for path in &self.paths {
            if path.exists() {
                match std::fs::remove_file(path) {
                    Ok(()) => {
                        debug!("Removed staged image {}", path.display());
                        removed += 1;
                    }
                    Err(e) => {
                        // Cleanup is best-effort; a locked file is not worth
                        // failing an already-successful run over.
                        tracing::warn!("Could not remove {}: {}", path.display(), e);
                    }
                }
            }
        }
        removed
    }
}

/// Fetch the screenshot for every page 1..=`page_count` and stage each to a
/// temp file.
///
/// Returns the complete ordered sequence only if every page succeeds.
pub async fn fetch_images(
    client: &reqwest::Client,
    sid: &SecureId,
    page_count: usize,
    config: &ConversionConfig,
    buster: &CacheBuster,
) -> Result<StagedImages, Resume2PdfError> {
    let total = page_count;
    let format = config.image_format;
    let timeout = config.timeout_secs;

    let mut staged: Vec<(usize, PathBuf, u64)> = stream::iter((1..=total).map(|page| {
        // URL construction happens here, while the iterator is advanced in
        // page order — this is what guarantees both the issue order and the
        // per-page distinctness of the cache value.
        let url = image_url(
            &config.api_base,
            sid,
            page,
            format,
            buster.next(),
            config.image_size,
        );
        let client = client.clone();
        let progress = config.progress_callback.clone();

        async move {
            if let Some(ref cb) = progress {
                cb.on_page_start(page, total);
            }
            debug!("Fetching image {}/{}: {}", page, total, url);

            // Every failure path goes through here so the caller's progress
            // display never shows a silently stalled page.
            let report = |err: Resume2PdfError| {
                if let Some(ref cb) = progress {
                    cb.on_page_error(page, total, err.to_string());
                }
                err
            };

            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| report(request_error(e, &url, timeout)))?;

            let status = response.status().as_u16();
            if status != 200 {
                return Err(report(Resume2PdfError::ImageFailed { page, status }));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| report(request_error(e, &url, timeout)))?;
            let len = bytes.len() as u64;

            let path = tokio::task::spawn_blocking(move || stage_bytes(&bytes, format))
                .await
                .map_err(|e| {
                    report(Resume2PdfError::Internal(format!(
                        "Staging task panicked: {e}"
                    )))
                })?
                .map_err(&report)?;

            debug!("Staged page {} → {} ({} bytes)", page, path.display(), len);
            if let Some(ref cb) = progress {
                cb.on_page_fetched(page, total, len as usize);
            }

            Ok::<_, Resume2PdfError>((page, path, len))
        }
    }))
    .buffered(config.concurrency)
    .try_collect()
    .await?;

    // buffered() already preserves input order, but the index alignment is
    // a hard invariant of the assembler, so it never rides on a stream
    // combinator's ordering contract.
    staged.sort_by_key(|(page, _, _)| *page);

    if staged.len() != total {
        return Err(Resume2PdfError::Internal(format!(
            "Staged {} images for {} pages",
            staged.len(),
            total
        )));
    }

    let total_bytes = staged.iter().map(|(_, _, len)| len).sum();
    info!("Fetched {} images ({} bytes)", total, total_bytes);

    Ok(StagedImages {
        paths: staged.into_iter().map(|(_, path, _)| path).collect(),
        total_bytes,
    })
}

/// Write response bytes to a fresh temp file and detach it from the
/// auto-delete guard — the default cleanup policy is "keep".
fn stage_bytes(bytes: &[u8], format: ImageFormat) -> Result<PathBuf, Resume2PdfError> {
    let stage_failed = |path: &Path| {
        let path = path.to_path_buf();
        move |e: std::io::Error| Resume2PdfError::StageFailed { path, source: e }
    };

    let mut file = tempfile::Builder::new()
        .prefix("resumeio2pdf-")
        .suffix(&format!(".{}", format.extension()))
        .tempfile()
        .map_err(stage_failed(&std::env::temp_dir()))?;

    file.write_all(bytes)
        .map_err(stage_failed(file.path()))?;

    let (_file, path) = file.keep().map_err(|e| Resume2PdfError::StageFailed {
        path: e.file.path().to_path_buf(),
        source: e.error,
    })?;

    Ok(path)
}
