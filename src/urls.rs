//! SecureID validation and remote endpoint URL construction.
//!
//! resume.io renders published resumes through `ssr.resume.tools`, keyed by
//! an opaque alphanumeric token (the "SecureID"). Two endpoints matter:
//!
//! * `GET {base}/meta/ssid-{sid}?cache={ts}` — JSON page metadata
//! * `GET {base}/to-image/ssid-{sid}-{page}.{ext}?cache={ts}&size={px}` —
//!   one rendered screenshot per page
//!
//! Every request carries a `cache=` query value to defeat CDN/edge caching.
//! Values are produced by [`CacheBuster`], an atomic counter seeded from the
//! unix clock, so concurrent page fetches within one run are guaranteed to
//! use distinct values — a plain second-resolution timestamp would hand the
//! same value to every page fetched in the same second.

use crate::config::ImageFormat;
use crate::error::Resume2PdfError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Public resume page link prefix, accepted by [`SecureId::from_url`].
pub const RESUME_PAGE_URL: &str = "https://resume.io/r/";

static RE_SECURE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static RE_RESUME_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://resume\.io/r/([a-zA-Z0-9]+)").unwrap());

/// A validated resume identifier.
///
/// The remote service identifies a published resume by an opaque
/// alphanumeric token. Construction validates the `[a-zA-Z0-9]+` pattern so
/// the rest of the pipeline can splice the token into URLs verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecureId(String);

impl SecureId {
    /// Validate and wrap a raw token.
    pub fn new(input: impl Into<String>) -> Result<Self, Resume2PdfError> {
        let input = input.into();
        if RE_SECURE_ID.is_match(&input) {
            Ok(Self(input))
        } else {
            Err(Resume2PdfError::InvalidSecureId { input })
        }
    }

    /// Extract the SecureID from a public resume link
    /// (`https://resume.io/r/<SecureID>`).
    pub fn from_url(url: &str) -> Result<Self, Resume2PdfError> {
        RE_RESUME_URL
            .captures(url.trim())
            .and_then(|c| c.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| Resume2PdfError::InvalidResumeUrl {
                url: url.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Producer of distinct cache-busting query values.
///
/// Seeded with the current unix time (seconds) and incremented per request,
/// so the first value still reads like a timestamp while later values are
/// guaranteed unique within the run.
#[derive(Debug)]
pub struct CacheBuster(AtomicU64);

impl CacheBuster {
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(AtomicU64::new(seed))
    }

    /// Next cache-busting value; each call returns a fresh one.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for CacheBuster {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the metadata endpoint URL for a resume.
pub fn meta_url(base: &str, sid: &SecureId, cache: u64) -> String {
    format!("{}/meta/ssid-{}?cache={}", base.trim_end_matches('/'), sid, cache)
}

/// Build the page-screenshot endpoint URL for one page (1-indexed).
pub fn image_url(
    base: &str,
    sid: &SecureId,
    page: usize,
    format: ImageFormat,
    cache: u64,
    size: u32,
) -> String {
    format!(
        "{}/to-image/ssid-{}-{}.{}?cache={}&size={}",
        base.trim_end_matches('/'),
        sid,
        page,
        format.extension(),
        cache,
        size
    )
}
