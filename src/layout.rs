//! Offset-table construction from rendered line geometry.
//!
//! The text renderer reports one record per visually rendered line after each
//! full layout pass. Scanning those lines for verse markers (a bracketed
//! verse number, the markup convention of the chapter source) produces the
//! verse-indexed offset table everything else in this crate queries.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// A bracketed 1-3 digit verse number, e.g. `[23]`.
static VERSE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[0-9]{1,3}\]").expect("verse marker pattern is valid"));

/// One visually rendered line as reported by the renderer's layout pass.
///
/// `y` is the line's top edge within the text block, in pixels; lines arrive
/// in render order, so `y` is non-decreasing across a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub y: f32,
    pub height: f32,
}

impl TextLine {
    pub fn new(text: impl Into<String>, y: f32, height: f32) -> Self {
        TextLine {
            text: text.into(),
            y,
            height,
        }
    }
}

/// Verse-indexed offset table for one rendered chapter.
///
/// Entry `i` is the pixel offset of verse `i`'s first rendered line within
/// the scrollable content; the final entry is the bottom of the text block
/// and doubles as the content's total height. Offsets are non-decreasing,
/// with ties when several verses start on the same line.
///
/// `PartialEq` is element-wise so owners can skip swapping in a rebuilt
/// table that came out identical (the renderer re-reports layout more often
/// than the layout actually changes).
#[derive(Debug, Clone, PartialEq)]
pub struct VerseOffsets {
    offsets: Vec<f32>,
    newlines: Vec<bool>,
    paragraphs: Vec<bool>,
}

impl VerseOffsets {
    /// Build the offset table from one full layout pass.
    ///
    /// `leading_space` is the fixed header height above the text block;
    /// `trailing_space` is the fixed space reserved below it. Returns `None`
    /// when the renderer reported no lines at all (nothing was laid out, so
    /// there is nothing to index).
    pub fn build(lines: &[TextLine], leading_space: f32, trailing_space: f32) -> Option<Self> {
        let last = lines.last()?;

        let mut offsets = Vec::new();
        let mut newlines = Vec::new();
        let mut paragraphs = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            for _marker in VERSE_MARKER.find_iter(&line.text) {
                let starts_line = index == 0 || lines[index - 1].text.ends_with('\n');
                let starts_paragraph = index == 0 || lines[index - 1].text == "\n";
                newlines.push(starts_line);
                paragraphs.push(starts_paragraph);
                offsets.push(leading_space + line.y);
            }
        }

        // The bottom of the text block closes the table; it is both the last
        // verse's end bound and the content's total height.
        offsets.push(leading_space + last.y + last.height + trailing_space);

        debug!(
            verses = offsets.len() - 1,
            content_height = offsets.last().copied().unwrap_or(0.0),
            "Built verse offset table"
        );

        Some(VerseOffsets {
            offsets,
            newlines,
            paragraphs,
        })
    }

    /// Number of verses indexed (excludes the terminal entry).
    pub fn verse_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total height of the text block, including trailing space.
    pub fn content_height(&self) -> f32 {
        *self
            .offsets
            .last()
            .expect("offset table always holds the terminal entry")
    }

    /// All offsets including the terminal entry.
    pub fn as_slice(&self) -> &[f32] {
        &self.offsets
    }

    /// Offset of a verse's first rendered line, if the verse exists.
    pub fn verse_offset(&self, verse: usize) -> Option<f32> {
        if verse < self.verse_count() {
            Some(self.offsets[verse])
        } else {
            None
        }
    }

    /// Whether the verse starts at a rendered line break.
    pub fn starts_line(&self, verse: usize) -> Option<bool> {
        self.newlines.get(verse).copied()
    }

    /// Whether the verse opens a paragraph.
    pub fn starts_paragraph(&self, verse: usize) -> Option<bool> {
        self.paragraphs.get(verse).copied()
    }
}
