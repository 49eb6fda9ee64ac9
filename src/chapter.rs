//! Per-chapter scroll state.
//!
//! One `ChapterScroll` is owned by the screen showing the current chapter.
//! It holds the offset table between layout passes, folds the scroll and
//! drag event streams into derived state, and emits [`Effect`]s for the
//! scroll container to execute. Chapter transitions discard the table
//! before the next chapter lays out, so no query ever runs against text
//! that is no longer on screen.

use crate::config::ScrollTuning;
use crate::layout::{TextLine, VerseOffsets};
use crate::scroll::{
    self, ChapterRelease, ScrollTarget, VersePosition, overscroll_amount, release_action,
    verse_at_offset,
};
use crate::scrollbar::{self, TrackFrame};
use tracing::debug;

/// Fixed per-device geometry of the reading surface.
#[derive(Debug, Clone, Copy)]
pub struct ViewportMetrics {
    /// Height of the scrollable viewport.
    pub height: f32,
    /// Scrollbar track bounds in screen coordinates.
    pub frame: TrackFrame,
}

/// Directives for the scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    ScrollTo(f32),
    ScrollToEnd,
}

/// Scroll state for the chapter currently on screen.
pub struct ChapterScroll {
    tuning: ScrollTuning,
    viewport: ViewportMetrics,
    offsets: Option<VerseOffsets>,
    current_position: VersePosition,
    scroll_offset: f32,
    overscroll: f32,
    handle_position: f32,
    dragging_handle: bool,
}

impl ChapterScroll {
    pub fn new(tuning: ScrollTuning, viewport: ViewportMetrics) -> Self {
        ChapterScroll {
            tuning,
            viewport,
            offsets: None,
            current_position: VersePosition::Top,
            scroll_offset: 0.0,
            overscroll: 0.0,
            handle_position: viewport.frame.top,
            dragging_handle: false,
        }
    }

    /// The offset table for the rendered chapter, once layout has run.
    pub fn offsets(&self) -> Option<&VerseOffsets> {
        self.offsets.as_ref()
    }

    pub fn current_position(&self) -> VersePosition {
        self.current_position
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Signed overscroll; feeds the pull-to-change-chapter indicator.
    pub fn overscroll(&self) -> f32 {
        self.overscroll
    }

    /// Screen position of the scrollbar handle's top edge.
    pub fn handle_position(&self) -> f32 {
        self.handle_position
    }

    /// Whether the scrollbar should be drawn for this chapter.
    pub fn scrollbar_visible(&self) -> bool {
        match &self.offsets {
            Some(table) => !scrollbar::hidden(
                table.content_height(),
                self.viewport.height,
                self.tuning.min_scroll_ratio,
            ),
            None => false,
        }
    }

    /// Discard the offset table ahead of a chapter transition.
    ///
    /// The next chapter's layout pass rebuilds it; until then position
    /// queries report nothing.
    pub fn begin_transition(&mut self) {
        debug!("Discarding verse offsets for chapter transition");
        self.offsets = None;
        self.current_position = VersePosition::Top;
        self.scroll_offset = 0.0;
        self.overscroll = 0.0;
        self.handle_position = self.viewport.frame.top;
        self.dragging_handle = false;
    }

    /// Fold one full layout pass into the offset table.
    ///
    /// Returns true when the table actually changed. Renderers re-report
    /// layout more often than layout changes; an element-wise identical
    /// rebuild is dropped so dependent state is not touched for nothing.
    pub fn handle_text_layout(
        &mut self,
        lines: &[TextLine],
        leading_space: f32,
        trailing_space: f32,
    ) -> bool {
        let Some(rebuilt) = VerseOffsets::build(lines, leading_space, trailing_space) else {
            return false;
        };

        if self.offsets.as_ref() == Some(&rebuilt) {
            debug!("Layout pass produced an identical offset table; skipping");
            return false;
        }

        debug!(
            verses = rebuilt.verse_count(),
            content_height = rebuilt.content_height(),
            "Swapped in rebuilt verse offsets"
        );
        self.offsets = Some(rebuilt);
        true
    }

    /// Fold one scroll event into the derived position state.
    pub fn handle_scrolled(&mut self, offset: f32) {
        self.scroll_offset = offset;

        let Some(table) = &self.offsets else {
            return;
        };
        let content_height = table.content_height();

        self.overscroll = overscroll_amount(offset, content_height, self.viewport.height);

        if let Some(position) = verse_at_offset(table, offset, self.viewport.height, &self.tuning) {
            self.current_position = position;
        }

        // While the handle is being dragged it follows the finger, not the
        // content.
        if !self.dragging_handle && self.scrollbar_visible() {
            self.handle_position = scrollbar::handle_position(
                offset,
                content_height,
                self.viewport.height,
                self.viewport.frame,
            );
        }
    }

    /// A drag released past the overscroll threshold changes chapter.
    pub fn handle_drag_end(&self, has_previous: bool, has_next: bool) -> Option<ChapterRelease> {
        let table = self.offsets.as_ref()?;
        release_action(
            self.scroll_offset,
            table.content_height(),
            self.viewport.height,
            &self.tuning,
            has_previous,
            has_next,
        )
    }

    pub fn begin_handle_drag(&mut self) {
        if self.scrollbar_visible() {
            self.dragging_handle = true;
        }
    }

    /// Move the dragged handle; emits the scroll directive that keeps the
    /// content under the finger.
    pub fn handle_drag_moved(&mut self, position: f32, effects: &mut Vec<Effect>) {
        if !self.dragging_handle {
            return;
        }
        let Some(table) = &self.offsets else {
            return;
        };

        let content_height = table.content_height();
        let handle_height = scrollbar::handle_height(content_height, self.viewport.height);
        let max_handle_top =
            (self.viewport.frame.bottom - handle_height).max(self.viewport.frame.top);
        self.handle_position = position.clamp(self.viewport.frame.top, max_handle_top);

        let offset = scrollbar::offset_for_handle_position(
            self.handle_position,
            content_height,
            self.viewport.height,
            self.viewport.frame,
        );
        effects.push(Effect::ScrollTo(offset));
    }

    pub fn end_handle_drag(&mut self) {
        self.dragging_handle = false;
    }

    /// Issue the scroll directive that brings a verse to the reference line.
    pub fn jump_to_position(&self, position: VersePosition, effects: &mut Vec<Effect>) {
        let Some(table) = &self.offsets else {
            // Mid-transition there is nothing to aim at; the top is the only
            // safe destination.
            effects.push(Effect::ScrollTo(0.0));
            return;
        };

        let reference = self.tuning.reference_line_px(self.viewport.height);
        match scroll::scroll_target_for_position(table, position, reference) {
            ScrollTarget::Offset(offset) => effects.push(Effect::ScrollTo(offset)),
            ScrollTarget::End => effects.push(Effect::ScrollToEnd),
        }
    }

    /// Verse-number rail positions for the active scrollbar.
    pub fn verse_ticks(&self) -> Vec<f32> {
        match &self.offsets {
            Some(table) => scrollbar::verse_tick_positions(table, self.viewport.frame),
            None => Vec::new(),
        }
    }
}
