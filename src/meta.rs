//! Resume metadata as reported by the remote rendering service.
//!
//! The metadata endpoint returns a JSON document whose `pages` array drives
//! the whole pipeline: its length is the number of screenshots to fetch, and
//! each entry's `viewport` supplies the pixel dimensions used to size the
//! matching PDF page. Unknown fields are ignored — the service reports more
//! than we need and its schema has changed before.

use serde::{Deserialize, Serialize};

/// Parsed metadata for one resume. Immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeMetadata {
    /// Ordered page descriptors; index i describes page i+1.
    pub pages: Vec<PageDescriptor>,
}

impl ResumeMetadata {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Per-page metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub viewport: Viewport,
}

/// Pixel dimensions of a rendered page.
///
/// Viewport pixels are mapped 1:1 onto PDF points when sizing pages, the
/// same convention the upstream service's own PDF export uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Portrait transform: (shorter, longer) edge.
    ///
    /// Page boxes are always created portrait. The image itself is still
    /// drawn at the raw `width` × `height`, so landscape metadata produces a
    /// page/image mismatch rather than being corrected — the observed
    /// upstream behavior, kept deliberately.
    pub fn portrait(self) -> (f32, f32) {
        (
            self.width.min(self.height),
            self.width.max(self.height),
        )
    }
}
