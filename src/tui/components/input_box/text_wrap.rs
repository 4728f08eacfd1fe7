//! Soft-wrap layout and char/word boundary helpers for the InputBox.
//!
//! [`WrapLayout`] records every visual line as a byte range of the buffer, so
//! measuring, drawing and cursor placement all agree on where lines begin.
//! Whitespace swallowed at a soft break belongs to no range; it sits between
//! the end of one line and the start of the next.

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

/// Left/right border plus one column of padding on each side
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Columns from the area's left edge to the first content cell
pub(super) const CONTENT_OFFSET_X: u16 = 2;
/// Rows from the area's top edge to the first content row
pub(super) const CONTENT_OFFSET_Y: u16 = 1;
/// Default cap on visible content lines before the box scrolls internally
pub const DEFAULT_MAX_VISIBLE_LINES: u16 = 5;

/// Inner content width after borders and padding. 0 when the area is too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Visual lines of a buffer wrapped to a fixed width.
pub(super) struct WrapLayout {
    lines: Vec<Range<usize>>,
}

impl WrapLayout {
    /// Wrap `text` at `width` columns. Width 0 leaves each logical line unwrapped.
    pub fn new(text: &str, width: u16) -> Self {
        let options = textwrap::Options::new(usize::from(width.max(1)))
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let mut lines = Vec::new();
        let mut logical_start = 0;
        for logical in text.split('\n') {
            let first_visual = lines.len();
            if width > 0 && !logical.is_empty() {
                let mut search_from = 0;
                for piece in textwrap::wrap(logical, &options) {
                    let range = locate(logical, &piece, search_from);
                    search_from = range.end;
                    lines.push(logical_start + range.start..logical_start + range.end);
                }
            }
            // Every logical line owns at least one visual line
            if lines.len() == first_visual {
                lines.push(logical_start..logical_start + logical.len());
            }
            // Skip past the '\n' that ended this logical line
            logical_start += logical.len() + 1;
        }

        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Range<usize> {
        self.lines[index].clone()
    }

    /// Index of the visual line that holds byte offset `pos`.
    ///
    /// A position inside whitespace dropped at a soft break stays on the
    /// line before the break.
    pub fn line_at(&self, pos: usize) -> usize {
        self.lines
            .partition_point(|line| line.start <= pos)
            .saturating_sub(1)
    }

    /// Display column of `pos` within its visual line.
    pub fn column_at(&self, text: &str, pos: usize) -> usize {
        let line = self.line(self.line_at(pos));
        text[line.start..pos].width()
    }

    /// Byte offset on `index` closest to display column `column`, never past the line end.
    pub fn offset_for_column(&self, text: &str, index: usize, column: usize) -> usize {
        let line = self.line(index);
        let mut used = 0;
        for (i, c) in text[line.clone()].char_indices() {
            used += unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if used > column {
                return line.start + i;
            }
        }
        line.end
    }

    /// Text of lines `first..first + count`, one per row.
    pub fn visible_text(&self, text: &str, first: usize, count: usize) -> String {
        let first = first.min(self.lines.len());
        let last = (first + count).min(self.lines.len());
        self.lines[first..last]
            .iter()
            .map(|line| &text[line.clone()])
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Byte range of a wrapped `piece` inside `logical`, searching from `search_from`.
///
/// Pieces come back in order and only whitespace separates them, so the first
/// match at or after the previous line's end is the right one.
fn locate(logical: &str, piece: &str, search_from: usize) -> Range<usize> {
    let start = logical[search_from..]
        .find(piece)
        .map_or(search_from, |i| search_from + i);
    let mut end = (start + piece.len()).min(logical.len());
    while !logical.is_char_boundary(end) {
        end -= 1;
    }
    start..end
}

/// Number of visual lines `text` occupies at `width`. Never less than 1.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    WrapLayout::new(text, width).line_count() as u16
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .chars()
        .next_back()
        .map_or(0, |c| pos - c.len_utf8())
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word before `pos` (readline `backward-word`).
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let before = &text[..pos];
    let word_end = before.trim_end_matches(|c| !is_word_char(c)).len();
    before[..word_end].trim_end_matches(is_word_char).len()
}

/// End of the word after `pos` (readline `forward-word`).
pub(super) fn next_word_boundary(text: &str, pos: usize) -> usize {
    let after = &text[pos..];
    let word_start = after.len() - after.trim_start_matches(|c| !is_word_char(c)).len();
    let rest = &after[word_start..];
    pos + word_start + (rest.len() - rest.trim_start_matches(is_word_char).len())
}
