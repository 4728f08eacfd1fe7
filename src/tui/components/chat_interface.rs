//! # ChatInterface Component
//!
//! Top-level chat container: a message-history area with the `InputBox` below it.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │                              │
//! │   history (reserved, empty)  │  Min(0)
//! │                              │
//! ├──────────────────────────────┤
//! │   spacer                     │  Length(1)
//! ├──────────────────────────────┤
//! │ ╭──────────────────────────╮ │
//! │ │ input box                │ │  Length(InputBox::calculate_height)
//! │ ╰──────────────────────────╯ │
//! └──────────────────────────────┘
//! ```
//!
//! History rendering and delivery of messages to a backend are not implemented.
//! The send handler only logs what it receives.

use log::info;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::config::ResolvedConfig;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::input_box::{InputBox, InputEvent};
use crate::tui::event::TuiEvent;

/// Rows between the history area and the input box
const INPUT_TOP_MARGIN: u16 = 1;

/// Placeholder send handler: records the message in the log and nothing else.
fn handle_send_message(message: &str) {
    info!(target: "chatbox::chat", "Sending message: {}", message);
}

pub struct ChatInterface {
    input_box: InputBox,
}

impl Default for ChatInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatInterface {
    pub fn new() -> Self {
        Self {
            input_box: InputBox::new(handle_send_message),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            input_box: InputBox::new(handle_send_message)
                .with_placeholder(config.placeholder.clone())
                .with_max_visible_lines(config.max_visible_lines),
        }
    }

    pub fn input_box(&self) -> &InputBox {
        &self.input_box
    }

    pub fn input_box_mut(&mut self) -> &mut InputBox {
        &mut self.input_box
    }

    /// Split `area` into (history, input). The input area hugs the bottom edge.
    pub fn layout(&self, area: Rect) -> (Rect, Rect) {
        use Constraint::{Length, Min};

        let input_height = self.input_box.calculate_height(area.width);
        let [history_area, _spacer, input_area] =
            Layout::vertical([Min(0), Length(INPUT_TOP_MARGIN), Length(input_height)])
                .areas(area);

        (history_area, input_area)
    }
}

impl Component for ChatInterface {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // History area stays blank until message history exists
        let (_history_area, input_area) = self.layout(area);
        self.input_box.render(frame, input_area);
    }
}

impl EventHandler for ChatInterface {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        self.input_box.handle_event(event)
    }
}
