//! Caret state for the InputBox.
//!
//! `CursorState` owns the caret byte offset, the internal scroll offset and the
//! width seen at the last render. Everything that maps the caret to rows and
//! columns goes through a [`WrapLayout`] of the whole buffer, the same layout
//! the box draws from.

use super::text_wrap::{CONTENT_OFFSET_X, CONTENT_OFFSET_Y, WrapLayout, inner_width};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Byte offset into the buffer, always on a char boundary
    pub pos: usize,
    /// First visible wrapped line (0 when content fits)
    pub scroll_offset: u16,
    /// Area width from the last render, used for Up/Down before the next frame
    pub last_content_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Step one visual line up (`direction < 0`) or down, keeping the display column.
    ///
    /// Returns `false` when already on the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, content_width: u16) -> bool {
        let layout = WrapLayout::new(buffer, inner_width(content_width));
        let current = layout.line_at(self.pos);

        let target = if direction < 0 {
            current.checked_sub(1)
        } else {
            Some(current + 1).filter(|&line| line < layout.line_count())
        };
        let Some(target) = target else {
            return false;
        };

        let column = layout.column_at(buffer, self.pos);
        self.pos = layout.offset_for_column(buffer, target, column);
        true
    }

    /// Visual line (0-based) the cursor sits on.
    pub fn line(&self, buffer: &str, content_width: u16) -> u16 {
        WrapLayout::new(buffer, inner_width(content_width)).line_at(self.pos) as u16
    }

    /// Scroll just enough to keep the cursor line inside the `max_lines` window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16, max_lines: u16) {
        let layout = WrapLayout::new(buffer, inner_width(content_width));
        if layout.line_count() <= usize::from(max_lines) {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = layout.line_at(self.pos) as u16;
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + max_lines {
            self.scroll_offset = cursor_line + 1 - max_lines;
        }
    }

    /// Screen (column, row) of the caret inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let layout = WrapLayout::new(buffer, width);

        let row = (layout.line_at(self.pos) as u16).saturating_sub(self.scroll_offset);
        // Trailing spaces before a soft break can push the column past the edge
        let column = (layout.column_at(buffer, self.pos) as u16).min(width);

        (
            area.x + CONTENT_OFFSET_X + column,
            area.y + CONTENT_OFFSET_Y + row,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // inner width = content width - 4
    const WIDTH_5: u16 = 9;

    fn cursor_at(pos: usize) -> CursorState {
        let mut cursor = CursorState::new();
        cursor.pos = pos;
        cursor
    }

    #[test]
    fn test_reset_clears_position_and_scroll() {
        let mut cursor = cursor_at(7);
        cursor.scroll_offset = 3;
        cursor.reset();
        assert_eq!(cursor.pos, 0);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn test_move_vertically_across_hard_breaks() {
        let buffer = "abcd\nefgh";
        let mut cursor = cursor_at(buffer.len());

        assert!(cursor.move_vertically(buffer, -1, 40));
        assert_eq!(cursor.pos, 4);
        assert!(!cursor.move_vertically(buffer, -1, 40));
        assert!(cursor.move_vertically(buffer, 1, 40));
        assert_eq!(cursor.pos, buffer.len());
    }

    #[test]
    fn test_move_vertically_clamps_to_shorter_line() {
        let buffer = "ab\nefgh";
        let mut cursor = cursor_at(buffer.len());
        assert!(cursor.move_vertically(buffer, -1, 40));
        assert_eq!(cursor.pos, 2);
    }

    #[test]
    fn test_move_down_across_soft_wrap_into_multibyte_line() {
        let buffer = "aaaaa ééééé";
        let mut cursor = cursor_at(3);

        assert!(cursor.move_vertically(buffer, 1, WIDTH_5));
        assert_eq!(cursor.pos, 12); // after the third 'é'
        assert!(buffer.is_char_boundary(cursor.pos));
        assert!(!cursor.move_vertically(buffer, 1, WIDTH_5));
    }

    #[test]
    fn test_move_up_from_end_of_soft_wrapped_line() {
        let buffer = "aaaaa bbbbb";
        let mut cursor = cursor_at(buffer.len());

        assert!(cursor.move_vertically(buffer, -1, WIDTH_5));
        assert_eq!(cursor.pos, 5);
        assert!(!cursor.move_vertically(buffer, -1, WIDTH_5));
    }

    #[test]
    fn test_move_up_keeps_display_column_with_wide_glyphs() {
        let buffer = "日本語\nabcdef";
        let mut cursor = cursor_at(buffer.len() - 2); // before "ef", column 4

        assert!(cursor.move_vertically(buffer, -1, 40));
        assert_eq!(cursor.pos, 6); // before '語'
    }

    #[test]
    fn test_line_inside_soft_wrapped_word() {
        // Cursor mid-word must use the full-buffer wrap, not a prefix wrap
        let buffer = "aaa bbbbbb";
        assert_eq!(cursor_at(6).line(buffer, 10), 1);
        assert_eq!(cursor_at(3).line(buffer, 10), 0);
    }

    #[test]
    fn test_line_after_trailing_newline() {
        let buffer = "one\ntwo\n";
        assert_eq!(cursor_at(buffer.len()).line(buffer, 40), 2);
    }

    #[test]
    fn test_scroll_follows_cursor_past_window() {
        let buffer = "1\n2\n3\n4\n5\n6\n7\n8";
        let mut cursor = cursor_at(buffer.len());

        cursor.update_scroll_offset(buffer, 40, 5);
        assert_eq!(cursor.scroll_offset, 3);

        cursor.pos = 0;
        cursor.update_scroll_offset(buffer, 40, 5);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_counts_soft_wrapped_lines() {
        // Six visual lines at inner width 5, cursor on the last one
        let buffer = "aaaaa bbbbb ccccc ddddd eeeee fffff";
        let mut cursor = cursor_at(buffer.len());
        cursor.update_scroll_offset(buffer, WIDTH_5, 5);
        assert_eq!(cursor.scroll_offset, 1);
    }

    #[test]
    fn test_screen_pos_accounts_for_border_and_padding() {
        let buffer = "hello";
        let area = Rect::new(0, 10, 40, 3);
        assert_eq!(cursor_at(buffer.len()).screen_pos(buffer, area), (7, 11));
    }

    #[test]
    fn test_screen_pos_uses_display_width() {
        let buffer = "日本";
        let area = Rect::new(0, 0, 40, 3);
        assert_eq!(cursor_at(buffer.len()).screen_pos(buffer, area), (6, 1));
    }

    #[test]
    fn test_screen_pos_on_soft_wrapped_row() {
        let buffer = "aaa bbbbbb";
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(cursor_at(6).screen_pos(buffer, area), (4, 2));
    }

    #[test]
    fn test_screen_pos_clamps_trailing_spaces() {
        let buffer = "aaaaa     ";
        let area = Rect::new(0, 0, WIDTH_5, 3);
        let (x, _) = cursor_at(buffer.len()).screen_pos(buffer, area);
        assert_eq!(x, CONTENT_OFFSET_X + 5);
    }
}
