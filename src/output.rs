//! Result types returned by the conversion entry points.

use crate::meta::ResumeMetadata;
use serde::Serialize;
use std::path::PathBuf;

/// Everything a successful conversion produced.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    /// Where the PDF was written.
    pub pdf_path: PathBuf,

    /// The metadata the run was driven by.
    pub metadata: ResumeMetadata,

    /// Staged screenshot files, index-aligned with `metadata.pages`.
    ///
    /// Empty if the run was configured to delete them on success.
    pub staged_images: Vec<PathBuf>,

    /// Timing and volume statistics.
    pub stats: ConversionStats,
}

/// Statistics about a conversion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    /// Pages reported by metadata == pages fetched == pages in the PDF.
    pub page_count: usize,

    /// Total screenshot bytes downloaded.
    pub bytes_fetched: u64,

    /// Wall-clock time spent downloading screenshots.
    pub fetch_duration_ms: u64,

    /// Wall-clock time spent building and writing the PDF.
    pub assemble_duration_ms: u64,

    /// End-to-end wall-clock time, metadata request included.
    pub total_duration_ms: u64,
}
