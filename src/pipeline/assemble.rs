//! PDF assembly: one page per staged screenshot, sized to its viewport.
//!
//! Viewport pixels map 1:1 onto PDF points. Every page box goes through the
//! portrait transform (shorter edge becomes the width); the image itself is
//! drawn at the raw viewport width × height, stretched from the decoded
//! pixel grid, so landscape metadata stays uncorrected — see
//! [`crate::meta::Viewport::portrait`].
//!
//! Each page's op list carries its own "Page N of M" footer (Helvetica,
//! 10 pt, at 50 pt / 30 pt from the bottom-left corner). The upstream
//! exporter stamped the footer after finalising the page's content stream,
//! which attributed it to the following page and dropped it from the last
//! one; here pages are immutable op lists, so the footer belongs to the
//! page it labels.
//!
//! Runs in `spawn_blocking`: image decoding and PDF serialisation are
//! CPU-bound and would stall the async executor.

use crate::config::ConversionConfig;
use crate::error::Resume2PdfError;
use crate::meta::ResumeMetadata;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, RawImage,
    TextItem, XObjectTransform,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Footer text position, in points from the bottom-left page corner.
const FOOTER_POS: (f32, f32) = (50.0, 30.0);
const FOOTER_SIZE_PT: f32 = 10.0;

/// Build the PDF from the metadata and the staged images, writing it to
/// `output_path`.
///
/// Requires `staged.len() == metadata.pages.len()`; the caller (the main
/// conversion flow) upholds this by construction.
pub async fn assemble_pdf(
    metadata: &ResumeMetadata,
    staged: &[PathBuf],
    output_path: &Path,
    config: &ConversionConfig,
) -> Result<(), Resume2PdfError> {
    let metadata = metadata.clone();
    let staged = staged.to_vec();
    let output = output_path.to_path_buf();
    let progress = config.progress_callback.clone();

    tokio::task::spawn_blocking(move || {
        assemble_blocking(&metadata, &staged, &output, progress.as_deref())
    })
    .await
    .map_err(|e| Resume2PdfError::Internal(format!("Assembly task panicked: {e}")))?
}

fn assemble_blocking(
    metadata: &ResumeMetadata,
    staged: &[PathBuf],
    output: &Path,
    progress: Option<&dyn crate::progress::ConversionProgressCallback>,
) -> Result<(), Resume2PdfError> {
    if metadata.pages.is_empty() {
        return Err(Resume2PdfError::NoPages);
    }
    if staged.len() != metadata.pages.len() {
        return Err(Resume2PdfError::Internal(format!(
            "{} staged images for {} metadata pages",
            staged.len(),
            metadata.pages.len()
        )));
    }

    let title = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());

    let mut doc = PdfDocument::new(&title);
    let mut warnings = Vec::new();
    let total = staged.len();
    let mut pages = Vec::with_capacity(total);

    for (i, (descriptor, path)) in metadata.pages.iter().zip(staged).enumerate() {
        let page_num = i + 1;

        // Sanity-decode the header before handing the bytes to the PDF
        // layer, so a truncated download fails with the page number attached.
        let (px_w, px_h) =
            image::image_dimensions(path).map_err(|e| Resume2PdfError::ImageDecodeFailed {
                page: page_num,
                path: path.clone(),
                detail: e.to_string(),
            })?;
        debug!("Page {}: staged image is {}x{} px", page_num, px_w, px_h);

        let bytes = std::fs::read(path).map_err(|e| Resume2PdfError::StageFailed {
            path: path.clone(),
            source: e,
        })?;
        let raw = RawImage::decode_from_bytes(&bytes, &mut warnings).map_err(|e| {
            Resume2PdfError::ImageDecodeFailed {
                page: page_num,
                path: path.clone(),
                detail: e.to_string(),
            }
        })?;
        let image_id = doc.add_image(&raw);

        let viewport = descriptor.viewport;
        let (page_w, page_h) = viewport.portrait();

        // At 72 DPI one image pixel is one point; the scale factors stretch
        // the image to exactly the raw viewport size at the page origin.
        let scale_x = viewport.width / raw.width as f32;
        let scale_y = viewport.height / raw.height as f32;

        let ops = vec![
            Op::UseXobject {
                id: image_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(0.0)),
                    scale_x: Some(scale_x),
                    scale_y: Some(scale_y),
                    dpi: Some(72.0),
                    ..Default::default()
                },
            },
            Op::StartTextSection,
            Op::SetTextCursor {
                pos: Point {
                    x: Pt(FOOTER_POS.0),
                    y: Pt(FOOTER_POS.1),
                },
            },
            Op::SetFontSizeBuiltinFont {
                size: Pt(FOOTER_SIZE_PT),
                font: BuiltinFont::Helvetica,
            },
            Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(format!("Page {} of {}", page_num, total))],
                font: BuiltinFont::Helvetica,
            },
            Op::EndTextSection,
        ];

        pages.push(PdfPage::new(
            Mm::from(Pt(page_w)),
            Mm::from(Pt(page_h)),
            ops,
        ));
        debug!("Page {} added ({}x{} pt)", page_num, page_w, page_h);

        if let Some(cb) = progress {
            cb.on_page_assembled(page_num, total);
        }
    }

    let bytes = doc
        .with_pages(pages)
        .save(&PdfSaveOptions::default(), &mut warnings);
    for w in &warnings {
        debug!("printpdf: {:?}", w);
    }

    // Atomic write: temp file in the same directory, then rename, so a
    // failure mid-write never leaves a partial PDF at the output path.
    let tmp = output.with_extension("pdf.tmp");
    std::fs::write(&tmp, &bytes).map_err(|e| Resume2PdfError::OutputWriteFailed {
        path: output.to_path_buf(),
        source: e,
    })?;
    std::fs::rename(&tmp, output).map_err(|e| Resume2PdfError::OutputWriteFailed {
        path: output.to_path_buf(),
        source: e,
    })?;

    info!("Wrote {} pages to {}", total, output.display());
    Ok(())
}
