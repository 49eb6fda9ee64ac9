//! Verse-offset indexing and scroll-position mapping for a chapter reader.
//!
//! The reading surface renders a whole chapter as one scrollable text block.
//! Once the text renderer reports its line layout, this crate derives a table
//! mapping verse ordinal to vertical pixel offset, and answers the positional
//! questions the surrounding UI keeps asking while the user scrolls:
//!
//! - which verse is the "current" one for a given scroll offset,
//! - where to scroll to land on a given verse,
//! - where the scrollbar handle should sit, and where a dragged handle
//!   should send the content.
//!
//! Everything here is pure arithmetic over the offset table; rendering,
//! gestures, and animation stay with the UI layer. The table is owned by a
//! single [`chapter::ChapterScroll`] per displayed chapter and rebuilt from
//! scratch on every re-layout, so nothing needs locking.

pub mod chapter;
pub mod config;
pub mod layout;
pub mod scroll;
pub mod scrollbar;

pub use chapter::{ChapterScroll, Effect, ViewportMetrics};
pub use config::{ScrollTuning, load_tuning, parse_tuning};
pub use layout::{TextLine, VerseOffsets};
pub use scroll::{ChapterRelease, ScrollTarget, VersePosition};
pub use scrollbar::TrackFrame;

/// Route `tracing` output through the test harness.
///
/// Idempotent; tests that want the rebuild/transition diagnostics visible
/// call this first. Override the level with `RUST_LOG`.
#[cfg(test)]
pub(crate) fn init_test_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
