//! Positional queries against the verse offset table.
//!
//! These run on every scroll event, potentially dozens of times a second
//! while a finger is down, so they are plain arithmetic plus one
//! O(log n) search. All of them are pure; the owning chapter state decides
//! what to do with the answers.

use crate::config::ScrollTuning;
use crate::layout::VerseOffsets;

/// Where the reader currently is within a chapter.
///
/// The top/bottom sentinels stand in for a verse index near the content
/// extremes so boundary arithmetic never has to special-case verse 0 or the
/// last verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersePosition {
    Top,
    Bottom,
    Verse(usize),
}

/// Outbound scroll directive for the scroll container.
///
/// `End` is distinct from a numeric offset because only the container knows
/// its exact maximum scroll extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollTarget {
    Offset(f32),
    End,
}

/// Chapter change requested by releasing an overscrolled drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterRelease {
    Previous,
    Next,
}

/// Current verse for a scroll offset, or `None` when nothing qualifies.
///
/// Checks the edge sentinels first, then binary-searches for the rightmost
/// verse whose offset is at or above the viewport's reference line. The
/// rightmost rule biases ties (several verses starting on one rendered line)
/// toward the later verse, which is the tracking behavior readers expect.
/// `None` means "keep the previous answer", never "verse 0".
pub fn verse_at_offset(
    table: &VerseOffsets,
    offset: f32,
    viewport_height: f32,
    tuning: &ScrollTuning,
) -> Option<VersePosition> {
    let content_height = table.content_height();

    if offset + tuning.edge_tolerance_px > content_height - viewport_height {
        return Some(VersePosition::Bottom);
    }
    if offset < tuning.edge_tolerance_px {
        return Some(VersePosition::Top);
    }
    if table.verse_count() == 0 {
        // Markerless content (intro/tutorial text) only ever reports the
        // sentinels.
        return None;
    }

    let target = offset + tuning.reference_line_px(viewport_height);
    let offsets = table.as_slice();

    let mut low = 0usize;
    let mut high = offsets.len() - 1;
    let mut result: Option<usize> = None;

    while low <= high {
        let mid = (low + high) / 2;
        if offsets[mid] <= target {
            result = Some(mid);
            low = mid + 1;
        } else {
            if mid == 0 {
                break;
            }
            high = mid - 1;
        }
    }

    // The terminal entry is not a verse; if the search lands on it the
    // reader is inside the last verse's tail.
    result.map(|idx| VersePosition::Verse(idx.min(table.verse_count() - 1)))
}

/// Scroll directive that brings a verse to the viewport's reference line.
///
/// A verse index past the table's range is a caller bug; release builds
/// clamp to the last verse rather than crash mid-scroll.
pub fn scroll_target_for_position(
    table: &VerseOffsets,
    position: VersePosition,
    reference_line_px: f32,
) -> ScrollTarget {
    match position {
        VersePosition::Top => ScrollTarget::Offset(0.0),
        VersePosition::Bottom => ScrollTarget::End,
        VersePosition::Verse(verse) => {
            debug_assert!(
                verse < table.verse_count(),
                "verse {verse} out of range for table of {} verses",
                table.verse_count()
            );
            if table.verse_count() == 0 {
                return ScrollTarget::Offset(0.0);
            }
            let verse = verse.min(table.verse_count() - 1);
            ScrollTarget::Offset(table.as_slice()[verse] - reference_line_px)
        }
    }
}

/// Signed distance past the content bounds; zero while in bounds.
///
/// Negative when pulled past the top, positive when pulled past the bottom.
pub fn overscroll_amount(offset: f32, content_height: f32, viewport_height: f32) -> f32 {
    let max_offset = content_height - viewport_height;
    if offset < 0.0 {
        offset
    } else if offset > max_offset {
        offset - max_offset
    } else {
        0.0
    }
}

/// Chapter change armed by the offset at which a drag was released.
///
/// `has_previous`/`has_next` gate the two directions so the first and last
/// chapters never arm a change that cannot happen.
pub fn release_action(
    offset: f32,
    content_height: f32,
    viewport_height: f32,
    tuning: &ScrollTuning,
    has_previous: bool,
    has_next: bool,
) -> Option<ChapterRelease> {
    if offset < -tuning.overscroll_release_px && has_previous {
        Some(ChapterRelease::Previous)
    } else if offset > content_height - viewport_height + tuning.overscroll_release_px && has_next {
        Some(ChapterRelease::Next)
    } else {
        None
    }
}
