//! Pipeline stages for resume-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping the
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. the PDF backend) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! metadata ──▶ fetch ──▶ assemble
//! (JSON)    (temp PNGs)  (printpdf)
//! ```
//!
//! 1. [`metadata`] — GET the page metadata JSON and parse it
//! 2. [`fetch`]    — GET one screenshot per page, staged to temp files,
//!    index-aligned with the metadata pages
//! 3. [`assemble`] — one PDF page per image, sized to its viewport; runs in
//!    `spawn_blocking` because PDF encoding is CPU-bound
//!
//! Control flows strictly left to right; a failure in any stage aborts the
//! run and no PDF is written.

pub mod assemble;
pub mod fetch;
pub mod metadata;
