//! # resumeio2pdf
//!
//! Download the per-page screenshots of a published resume.io resume and
//! assemble them into a single PDF, one image per page, each page sized to
//! the viewport the rendering service reports for it.
//!
//! ## Why this crate?
//!
//! resume.io only offers PDF export behind a subscription, but the public
//! share link renders every page through `ssr.resume.tools` as a plain
//! screenshot endpoint. This crate walks that endpoint: fetch the page
//! metadata, fetch one screenshot per page, and rebuild the document
//! locally with a page-number footer.
//!
//! ## Pipeline Overview
//!
//! ```text
//! SecureID
//!  │
//!  ├─ 1. Metadata  GET meta/ssid-{sid} → page count + viewports
//!  ├─ 2. Fetch     GET to-image/ssid-{sid}-{page}.png per page → temp files
//!  ├─ 3. Assemble  one printpdf page per image, viewport-sized, footer stamped
//!  └─ 4. Cleanup   optionally delete staged files (default: keep)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resumeio2pdf::{convert, ConversionConfig, SecureId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sid = SecureId::new("abc123")?;
//!     let config = ConversionConfig::default();
//!     let output = convert(&sid, "abc123.pdf", &config).await?;
//!     println!("{} pages → {}", output.stats.page_count, output.pdf_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resumeio2pdf` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! resumeio2pdf = { version = "1.0", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod meta;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod urls;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, ImageFormat};
pub use convert::{convert, convert_sync, inspect};
pub use error::Resume2PdfError;
pub use meta::{PageDescriptor, ResumeMetadata, Viewport};
pub use output::{ConversionOutput, ConversionStats};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use urls::SecureId;
