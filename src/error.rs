//! Error types for the resumeio2pdf library.
//!
//! The pipeline is all-or-nothing: a failure at any stage aborts the whole
//! run and no PDF is written. There is therefore a single fatal error enum
//! rather than a fatal/per-page split — the first page that fails to fetch
//! takes the document down with it, by contract.
//!
//! Nothing here is retried. Timeouts and non-200 responses surface
//! immediately with enough context (URL, page number, HTTP status) for the
//! user to decide what to do next.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the resumeio2pdf library.
#[derive(Debug, Error)]
pub enum Resume2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The SecureID does not match the `[a-zA-Z0-9]+` pattern.
    #[error("Invalid SecureID '{input}': expected an alphanumeric token, e.g. 'AbC123'")]
    InvalidSecureId { input: String },

    /// A resume link was given but does not look like `https://resume.io/r/<SecureID>`.
    #[error("Invalid resume link '{url}'\nExpected the form: https://resume.io/r/<SecureID>")]
    InvalidResumeUrl { url: String },

    // ── Fetch errors ──────────────────────────────────────────────────────
    /// The metadata endpoint answered with a non-200 status.
    #[error("Error getting meta information: HTTP {status}\nCheck that the SecureID is correct and the resume is still published.")]
    MetadataFailed { status: u16 },

    /// The metadata body was not the JSON document we expect.
    #[error("Failed to parse resume metadata: {detail}")]
    MetadataParse { detail: String },

    /// The screenshot endpoint answered with a non-200 status for one page.
    #[error("Error getting image {page}: HTTP {status}")]
    ImageFailed { page: usize, status: u16 },

    /// A request exceeded the configured timeout.
    #[error("Request timed out after {secs}s: '{url}'\nIncrease --timeout if the service is slow.")]
    RequestTimeout { url: String, secs: u64 },

    /// A request failed below the HTTP layer (DNS, TLS, connection reset).
    #[error("Request to '{url}' failed: {reason}\nCheck your internet connection.")]
    Network { url: String, reason: String },

    // ── Staging errors ────────────────────────────────────────────────────
    /// Could not create or write a temporary image file.
    #[error("Failed to stage image to '{path}': {source}")]
    StageFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Assembly errors ───────────────────────────────────────────────────
    /// Metadata reported zero pages; a PDF needs at least one.
    #[error("Resume metadata reports no pages — nothing to convert")]
    NoPages,

    /// A staged image could not be decoded for embedding.
    #[error("Failed to decode image for page {page} ('{path}'): {detail}")]
    ImageDecodeFailed {
        page: usize,
        path: PathBuf,
        detail: String,
    },

    /// The output file already exists and overwriting was disabled.
    #[error("Output file '{path}' already exists\nRemove the file or allow overwriting.")]
    OutputExists { path: PathBuf },

    /// Could not write the output PDF.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
