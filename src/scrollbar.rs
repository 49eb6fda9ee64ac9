//! Scrollbar handle geometry.
//!
//! The handle lives in the fixed screen frame while the content it tracks
//! lives in content space; the two mappings here rescale between them. The
//! forward map runs on every scroll event to place the handle, the inverse
//! runs while the user drags the handle to reposition the content. On the
//! clamped track they are exact inverses of each other.

use crate::layout::VerseOffsets;

/// Vertical extent of the scrollbar track in screen coordinates.
///
/// `top` and `bottom` are typically the screen's safe-area bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackFrame {
    pub top: f32,
    pub bottom: f32,
}

impl TrackFrame {
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Handle height for a content/viewport pair.
///
/// Shrinks in inverse proportion to content height: a chapter barely taller
/// than the screen gets a near-full-height handle, a long chapter a small
/// one.
pub fn handle_height(content_height: f32, viewport_height: f32) -> f32 {
    viewport_height * (viewport_height / content_height.max(1.0))
}

/// Screen position of the handle's top edge for a content offset.
///
/// Maps the scrollable range `[0, content - viewport]` linearly onto the
/// track `[frame.top, frame.bottom - handle_height]`. Callers must not
/// invoke this when the content fits the viewport (see [`hidden`]).
pub fn handle_position(
    offset: f32,
    content_height: f32,
    viewport_height: f32,
    frame: TrackFrame,
) -> f32 {
    debug_assert!(
        content_height > viewport_height,
        "scrollbar queried for content that fits the viewport"
    );
    // Shares its guarded span factors with `offset_for_handle_position` so
    // the two maps stay exact inverses even on a degenerate sub-pixel track.
    let max_handle_top =
        (frame.bottom - handle_height(content_height, viewport_height)).max(frame.top);
    let scroll_ratio = offset / (content_height - viewport_height).max(1.0);
    frame.top + scroll_ratio * (max_handle_top - frame.top).max(1.0)
}

/// Content offset for a dragged handle position; inverse of
/// [`handle_position`].
///
/// The position is clamped to the track first so a finger dragged past
/// either end never derives an offset outside the content bounds.
pub fn offset_for_handle_position(
    position: f32,
    content_height: f32,
    viewport_height: f32,
    frame: TrackFrame,
) -> f32 {
    debug_assert!(
        content_height > viewport_height,
        "scrollbar queried for content that fits the viewport"
    );
    // A handle taller than the track would invert the clamp bounds; pin it
    // to the track top instead.
    let max_handle_top =
        (frame.bottom - handle_height(content_height, viewport_height)).max(frame.top);
    let position = position.clamp(frame.top, max_handle_top);
    let track_ratio = (position - frame.top) / (max_handle_top - frame.top).max(1.0);
    track_ratio * (content_height - viewport_height).max(1.0)
}

/// Whether the scrollbar should be suppressed for this content.
pub fn hidden(content_height: f32, viewport_height: f32, min_scroll_ratio: f32) -> bool {
    content_height <= viewport_height * min_scroll_ratio
}

/// Screen positions for the verse-number rail shown while dragging.
///
/// Each verse offset is rescaled into the track; the terminal entry is
/// layout metadata, not a verse, and is skipped.
pub fn verse_tick_positions(table: &VerseOffsets, frame: TrackFrame) -> Vec<f32> {
    let content_height = table.content_height().max(1.0);
    let track_height = frame.height();
    let offsets = table.as_slice();

    offsets[..offsets.len() - 1]
        .iter()
        .map(|offset| offset / content_height * track_height)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TextLine;

    const FRAME: TrackFrame = TrackFrame {
        top: 60.0,
        bottom: 860.0,
    };

    #[test]
    fn handle_shrinks_with_content_height() {
        let h = handle_height(3000.0, 800.0);
        assert!((h - 800.0 * (800.0 / 3000.0)).abs() < 1e-3);
        assert!((h - 213.333).abs() < 0.01);

        let near_fit = handle_height(900.0, 800.0);
        assert!(near_fit > h, "shorter content should grow the handle");
    }

    #[test]
    fn handle_spans_the_track_edges() {
        let content = 3000.0;
        let viewport = 800.0;

        let at_top = handle_position(0.0, content, viewport, FRAME);
        assert!((at_top - FRAME.top).abs() < 1e-3);

        let at_bottom = handle_position(content - viewport, content, viewport, FRAME);
        let expected = FRAME.bottom - handle_height(content, viewport);
        assert!((at_bottom - expected).abs() < 1e-3);
    }

    #[test]
    fn drag_round_trips_within_tolerance() {
        let content = 5400.0;
        let viewport = 780.0;

        let mut offset = 0.0;
        while offset <= content - viewport {
            let position = handle_position(offset, content, viewport, FRAME);
            let back = offset_for_handle_position(position, content, viewport, FRAME);
            assert!(
                (back - offset).abs() < 1e-2,
                "round trip drifted at offset {offset}: {back}"
            );
            offset += 37.5;
        }
    }

    #[test]
    fn sub_pixel_track_still_round_trips() {
        // Content barely taller than the viewport leaves the handle almost
        // as tall as the track; both maps must still agree.
        let content = 800.5;
        let viewport = 800.0;

        for offset in [0.0, 0.25, 0.5] {
            let position = handle_position(offset, content, viewport, FRAME);
            let back = offset_for_handle_position(position, content, viewport, FRAME);
            assert!(
                (back - offset).abs() < 1e-3,
                "round trip drifted on sub-pixel track at offset {offset}: {back}"
            );
        }
    }

    #[test]
    fn drag_past_track_edges_clamps_to_content_bounds() {
        let content = 3000.0;
        let viewport = 800.0;

        let above = offset_for_handle_position(FRAME.top - 200.0, content, viewport, FRAME);
        assert_eq!(above, 0.0);

        let below = offset_for_handle_position(FRAME.bottom + 200.0, content, viewport, FRAME);
        assert!((below - (content - viewport)).abs() < 1e-3);
    }

    #[test]
    fn short_content_hides_the_scrollbar() {
        assert!(hidden(700.0, 800.0, 1.0));
        assert!(hidden(800.0, 800.0, 1.0));
        assert!(!hidden(801.0, 800.0, 1.0));
        assert!(hidden(1000.0, 800.0, 1.3), "ratio raises the bar");
    }

    #[test]
    fn tick_positions_rescale_offsets_and_skip_terminal() {
        let lines = vec![
            TextLine::new("[1] a", 0.0, 500.0),
            TextLine::new("[2] b", 500.0, 500.0),
            TextLine::new("[3] c", 1000.0, 600.0),
        ];
        let table = VerseOffsets::build(&lines, 0.0, 0.0).expect("table");
        assert_eq!(table.content_height(), 1600.0);

        let ticks = verse_tick_positions(&table, FRAME);
        assert_eq!(ticks.len(), 3, "terminal entry is not a tick");

        let track = FRAME.height();
        assert!((ticks[0] - 0.0).abs() < 1e-3);
        assert!((ticks[1] - 500.0 / 1600.0 * track).abs() < 1e-3);
        assert!((ticks[2] - 1000.0 / 1600.0 * track).abs() < 1e-3);
    }
}
