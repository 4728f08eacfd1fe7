//! # InputBox Component
//!
//! Multi-line message composer that grows with its content and submits on Enter.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, line breaks via Shift+Enter)
//! - Handle editing (backspace, delete, word deletion, cursor movement)
//! - Auto-resize: height follows the wrapped line count, from 1 line up to
//!   `max_visible_lines`, then scrolls internally
//! - Handle submission (Enter): trim, hand the message to `on_send_message`, clear
//!
//! ## State Management
//!
//! The buffer is internal state. The send callback and styling are props supplied
//! by the parent. Cursor position and scroll state are encapsulated in `CursorState`.
//!
//! Height is never stored; it is derived from the buffer and the available width
//! every time it is needed, so it can't drift out of sync with the content.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
pub use text_wrap::DEFAULT_MAX_VISIBLE_LINES;
use text_wrap::{
    VERTICAL_OVERHEAD, WrapLayout, inner_width, next_char_boundary, next_word_boundary,
    prev_char_boundary, prev_word_boundary, wrap_line_count,
};

pub const DEFAULT_PLACEHOLDER: &str = "Type your message here...";

/// Callback invoked with each submitted message (already trimmed, never empty).
pub type SendHandler = Box<dyn FnMut(&str)>;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A message was handed to `on_send_message` and the buffer was cleared
    Sent,
    /// The buffer text changed
    Edited,
    /// Only the caret moved; the text is unchanged
    CursorMoved,
}

/// Auto-resizing text input.
///
/// # Props
///
/// - `on_send_message`: receives each trimmed, non-empty submission
/// - `style`: patched over the default style (see [`InputBox::with_style`])
/// - `placeholder`: dimmed hint shown while the buffer is empty
/// - `max_visible_lines`: height cap in content lines
///
/// # State
///
/// - `buffer`: current text being typed
/// - `cursor`: caret, scroll offset and cached width (see `CursorState`)
pub struct InputBox {
    buffer: String,
    cursor: CursorState,
    on_send_message: SendHandler,
    style: Style,
    placeholder: String,
    max_visible_lines: u16,
}

impl InputBox {
    pub fn new(on_send_message: impl FnMut(&str) + 'static) -> Self {
        Self {
            buffer: String::new(),
            cursor: CursorState::new(),
            on_send_message: Box::new(on_send_message),
            style: Style::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            max_visible_lines: DEFAULT_MAX_VISIBLE_LINES,
        }
    }

    /// Merge extra styling over the built-in look. Fields left unset in `style`
    /// keep their defaults.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Cap on content lines. Values below 1 are raised to 1.
    pub fn with_max_visible_lines(mut self, max_visible_lines: u16) -> Self {
        self.max_visible_lines = max_visible_lines.max(1);
        self
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer wholesale and park the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor.pos = self.buffer.len();
    }

    /// Caret byte offset into [`InputBox::text`].
    pub fn cursor(&self) -> usize {
        self.cursor.pos
    }

    pub fn max_visible_lines(&self) -> u16 {
        self.max_visible_lines
    }

    /// Rows needed for the current buffer at `content_width`, borders included.
    ///
    /// Content rows are `min(wrapped lines, max_visible_lines)` and never below 1,
    /// so an empty box collapses to a single line.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        let content_lines = wrap_line_count(&self.buffer, width);
        content_lines.clamp(1, self.max_visible_lines) + VERTICAL_OVERHEAD
    }

    /// Trim the buffer and, if anything is left, send it and reset.
    ///
    /// Whitespace-only content is left untouched.
    pub fn submit(&mut self) -> Option<InputEvent> {
        let trimmed = self.buffer.trim();
        if trimmed.is_empty() {
            log::debug!("Ignoring empty submission ({} bytes)", self.buffer.len());
            return None;
        }

        log::debug!("Submitting message ({} bytes)", trimmed.len());
        (self.on_send_message)(trimmed);
        self.buffer.clear();
        self.cursor.reset();
        Some(InputEvent::Sent)
    }

    fn base_style() -> Style {
        Style::default().fg(Color::Green)
    }

    fn border_style() -> Style {
        Style::default().fg(Color::Blue)
    }

    fn insert_str(&mut self, text: &str) -> Option<InputEvent> {
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(InputEvent::Edited)
    }

    /// Move the cursor to `target`, reporting a change only if it actually moved.
    fn move_to(&mut self, target: usize) -> Option<InputEvent> {
        (self.cursor.pos != target).then(|| {
            self.cursor.pos = target;
            InputEvent::CursorMoved
        })
    }

    /// Wrapped lines inside the scroll window, joined for display.
    fn visible_text(&self, content_width: u16) -> String {
        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        WrapLayout::new(&self.buffer, width).visible_text(
            &self.buffer,
            usize::from(self.cursor.scroll_offset),
            usize::from(self.max_visible_lines),
        )
    }

    /// Scrollbar on the right border once content outgrows the visible window.
    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        let width = inner_width(area.width);
        let total_lines = wrap_line_count(&self.buffer, width);
        if total_lines <= self.max_visible_lines {
            return;
        }

        // content_length is the max scroll position, not the line count
        let max_scroll = total_lines.saturating_sub(self.max_visible_lines);
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

/// Terminals paste CRLF or bare CR line endings; the buffer only holds `\n`.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_content_width = area.width;
        self.cursor
            .update_scroll_offset(&self.buffer, area.width, self.max_visible_lines);

        let style = Self::base_style().patch(self.style);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Self::border_style())
            .padding(Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(Span::styled(
                self.placeholder.as_str(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Paragraph::new(self.visible_text(area.width))
        };

        frame.render_widget(paragraph.block(block).style(style), area);
        self.render_scrollbar(frame, area);

        let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut utf8))
            }
            TuiEvent::Paste(text) => self.insert_str(&normalize_line_endings(text)),
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::Edited)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::Edited)
            }
            TuiEvent::DeleteWordBack => {
                let start = prev_word_boundary(&self.buffer, self.cursor.pos);
                if start == self.cursor.pos {
                    return None;
                }
                self.buffer.drain(start..self.cursor.pos);
                self.cursor.pos = start;
                Some(InputEvent::Edited)
            }
            TuiEvent::CursorLeft if self.cursor.pos > 0 => {
                self.move_to(prev_char_boundary(&self.buffer, self.cursor.pos))
            }
            TuiEvent::CursorRight if self.cursor.pos < self.buffer.len() => {
                self.move_to(next_char_boundary(&self.buffer, self.cursor.pos))
            }
            TuiEvent::CursorWordLeft => {
                self.move_to(prev_word_boundary(&self.buffer, self.cursor.pos))
            }
            TuiEvent::CursorWordRight => {
                self.move_to(next_word_boundary(&self.buffer, self.cursor.pos))
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.move_to(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                self.move_to(line_end)
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_content_width)
                .then_some(InputEvent::CursorMoved),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_content_width)
                .then_some(InputEvent::CursorMoved),
            TuiEvent::Submit => self.submit(),
            _ => None,
        }
    }
}
