//! Metadata fetching: one GET against the `meta/ssid-{sid}` endpoint.
//!
//! The response drives everything downstream: page count for the image
//! fetcher, per-page viewports for the assembler. The contract is strict —
//! anything but HTTP 200 fails the run with the status embedded in the
//! error, and nothing is retried.

use crate::config::ConversionConfig;
use crate::error::Resume2PdfError;
use crate::meta::ResumeMetadata;
use crate::urls::{meta_url, CacheBuster, SecureId};
use tracing::{debug, info};

/// Fetch and parse the resume metadata.
pub async fn fetch_metadata(
    client: &reqwest::Client,
    sid: &SecureId,
    config: &ConversionConfig,
    buster: &CacheBuster,
) -> Result<ResumeMetadata, Resume2PdfError> {
    let url = meta_url(&config.api_base, sid, buster.next());
    debug!("Fetching metadata: {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| request_error(e, &url, config.timeout_secs))?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(Resume2PdfError::MetadataFailed { status });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| request_error(e, &url, config.timeout_secs))?;

    let metadata: ResumeMetadata =
        serde_json::from_slice(&body).map_err(|e| Resume2PdfError::MetadataParse {
            detail: e.to_string(),
        })?;

    info!("Resume has {} pages", metadata.page_count());
    Ok(metadata)
}

/// Map a reqwest error to the library error, distinguishing timeouts.
pub(crate) fn request_error(
    e: reqwest::Error,
    url: &str,
    timeout_secs: u64,
) -> Resume2PdfError {
    if e.is_timeout() {
        Resume2PdfError::RequestTimeout {
            url: url.to_string(),
            secs: timeout_secs,
        }
    } else {
        Resume2PdfError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}
