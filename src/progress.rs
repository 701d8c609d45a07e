//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! real-time events as the pipeline fetches and assembles each page.
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a terminal progress bar, a channel, or a log sink
//! without the library knowing how the host application communicates. The
//! trait is `Send + Sync` because image fetches run concurrently.

use std::sync::Arc;

/// Called by the conversion pipeline as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. `on_page_start`/`on_page_fetched` may be called
/// concurrently from different tasks; implementations must synchronise any
/// shared mutable state.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after metadata is parsed, before any image is fetched.
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called just before the screenshot request for a page is sent.
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when a page's screenshot has been staged to disk.
    ///
    /// `bytes` is the size of the downloaded image.
    fn on_page_fetched(&self, page_num: usize, total_pages: usize, bytes: usize) {
        let _ = (page_num, total_pages, bytes);
    }

    /// Called when a page has been drawn into the PDF.
    fn on_page_assembled(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called once when a page fails; the run aborts right after.
    ///
    /// Takes `String` rather than `&str` so the trait object stays `Send`
    /// when a callback is moved into a spawned task.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: String) {
        let _ = (page_num, total_pages, error);
    }

    /// Called once after the PDF has been written.
    fn on_conversion_complete(&self, total_pages: usize) {
        let _ = total_pages;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        fetched: AtomicUsize,
        assembled: AtomicUsize,
        errors: AtomicUsize,
        total: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_conversion_start(&self, total_pages: usize) {
            self.total.store(total_pages, Ordering::SeqCst);
        }

        fn on_page_start(&self, _page_num: usize, _total_pages: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_fetched(&self, _page_num: usize, _total_pages: usize, _bytes: usize) {
            self.fetched.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_assembled(&self, _page_num: usize, _total_pages: usize) {
            self.assembled.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_error(&self, _page_num: usize, _total_pages: usize, _error: String) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(2);
        cb.on_page_start(1, 2);
        cb.on_page_fetched(1, 2, 4096);
        cb.on_page_assembled(1, 2);
        cb.on_page_error(2, 2, "HTTP 404".to_string());
        cb.on_conversion_complete(2);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            fetched: AtomicUsize::new(0),
            assembled: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
        };

        tracker.on_conversion_start(2);
        tracker.on_page_start(1, 2);
        tracker.on_page_fetched(1, 2, 1000);
        tracker.on_page_start(2, 2);
        tracker.on_page_error(2, 2, "HTTP 500".to_string());

        assert_eq!(tracker.total.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.fetched.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.assembled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ConversionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(10);
        cb.on_page_fetched(1, 10, 512);
    }
}
