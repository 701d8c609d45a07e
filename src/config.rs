//! Configuration for a resume-to-PDF conversion.
//!
//! All behaviour is controlled through [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across tasks and to diff two runs when their
//! outputs differ.

use crate::error::Resume2PdfError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default base URL of the rendering service.
pub const DEFAULT_API_BASE: &str = "https://ssr.resume.tools";

/// Default requested screenshot size (longest edge, pixels).
pub const DEFAULT_IMAGE_SIZE: u32 = 1800;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Screenshot format requested from the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    /// Lossless; the default, and what the upstream exporter uses.
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    /// File extension as it appears in the image URL and staged file names.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration for a conversion run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use resumeio2pdf::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .timeout_secs(30)
///     .concurrency(2)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Base URL of the rendering service. Default: [`DEFAULT_API_BASE`].
    ///
    /// Overridable so tests (and any self-hosted mirror) can point the
    /// pipeline at a local server.
    pub api_base: String,

    /// Screenshot format to request. Default: PNG.
    pub image_format: ImageFormat,

    /// Requested screenshot size in pixels (longest edge). Default: 1800.
    ///
    /// 1800 px at the typical 800 pt page width is roughly 160 DPI — sharp
    /// enough to print while keeping downloads around 300–600 KB per page.
    pub image_size: u32,

    /// Per-request timeout in seconds. Default: 60.
    ///
    /// Applies separately to the metadata request and each image request.
    /// A timeout fails the whole run; nothing is retried.
    pub timeout_secs: u64,

    /// Number of concurrent image downloads. Default: 4.
    ///
    /// Requests are issued in page order regardless of this value, and the
    /// staged sequence is re-sorted by page index afterwards, so parallelism
    /// never changes the output.
    pub concurrency: usize,

    /// Keep staged screenshot files after a successful conversion. Default: true.
    ///
    /// When false, staged files are deleted only after the PDF has been
    /// written. Files staged before a failed run are always left behind.
    pub keep_images: bool,

    /// Overwrite an existing output file. Default: true.
    ///
    /// Repeat runs replace the previous output, like the upstream exporter.
    /// Set to false to fail with `OutputExists` instead of clobbering.
    pub overwrite: bool,

    /// Progress events for CLI bars, logs, etc. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            image_format: ImageFormat::default(),
            image_size: DEFAULT_IMAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: 4,
            keep_images: true,
            overwrite: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("api_base", &self.api_base)
            .field("image_format", &self.image_format)
            .field("image_size", &self.image_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("concurrency", &self.concurrency)
            .field("keep_images", &self.keep_images)
            .field("overwrite", &self.overwrite)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.config.api_base = base.into();
        self
    }

    pub fn image_format(mut self, format: ImageFormat) -> Self {
        self.config.image_format = format;
        self
    }

    pub fn image_size(mut self, px: u32) -> Self {
        self.config.image_size = px;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn keep_images(mut self, v: bool) -> Self {
        self.config.keep_images = v;
        self
    }

    pub fn overwrite(mut self, v: bool) -> Self {
        self.config.overwrite = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Resume2PdfError> {
        let c = &self.config;
        if c.image_size == 0 {
            return Err(Resume2PdfError::InvalidConfig(
                "Image size must be ≥ 1 pixel".into(),
            ));
        }
        if c.timeout_secs == 0 {
            return Err(Resume2PdfError::InvalidConfig(
                "Timeout must be ≥ 1 second".into(),
            ));
        }
        if c.api_base.is_empty() {
            return Err(Resume2PdfError::InvalidConfig("API base is empty".into()));
        }
        Ok(self.config)
    }
}
