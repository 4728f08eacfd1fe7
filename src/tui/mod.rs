//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the chat
//! interface, and routes keyboard events to it.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only redraws after an event. It sleeps up to
//! 500ms per poll and drains every pending event before drawing, so a large
//! paste arriving as many key events costs one frame instead of hundreds.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic while typing.

pub mod component;
pub mod components;
pub mod event;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::config::ResolvedConfig;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{ChatInterface, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL_TIMEOUT: Duration = Duration::from_millis(500);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter.
        // Terminals that don't support it ignore the sequence.
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut chat = ChatInterface::from_config(&config);

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| {
        let mut needs_redraw = true; // Force first frame

        loop {
            if needs_redraw {
                terminal.draw(|f| chat.render(f, f.area()))?;
                needs_redraw = false;
            }

            let Some(first_event) = poll_event_timeout(IDLE_POLL_TIMEOUT)? else {
                continue;
            };
            needs_redraw = true;

            let mut pending = vec![first_event];
            while let Some(event) = poll_event_immediate()? {
                pending.push(event);
            }

            if dispatch(&mut chat, pending) == LoopControl::Quit {
                info!("Quit requested");
                return Ok(());
            }
        }
    });

    ratatui::restore();
    result
}

#[derive(Debug, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Quit,
}

/// Route a batch of events to the chat interface, stopping at the first quit.
fn dispatch(chat: &mut ChatInterface, events: Vec<TuiEvent>) -> LoopControl {
    for event in events {
        match event {
            TuiEvent::Quit => return LoopControl::Quit,
            // Resize just needs a redraw
            TuiEvent::Resize => {}
            event => {
                if let Some(InputEvent::Sent) = chat.handle_event(&event) {
                    debug!("Message handed to chat interface");
                }
            }
        }
    }
    LoopControl::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_routes_typing_and_submit() {
        let mut chat = ChatInterface::new();
        let events = "hi".chars().map(TuiEvent::InputChar).collect();
        assert_eq!(dispatch(&mut chat, events), LoopControl::Continue);
        assert_eq!(chat.input_box().text(), "hi");

        dispatch(&mut chat, vec![TuiEvent::Submit]);
        assert_eq!(chat.input_box().text(), "");
    }

    #[test]
    fn test_dispatch_stops_at_quit() {
        let mut chat = ChatInterface::new();
        let events = vec![
            TuiEvent::InputChar('a'),
            TuiEvent::Quit,
            TuiEvent::InputChar('b'),
        ];
        assert_eq!(dispatch(&mut chat, events), LoopControl::Quit);
        assert_eq!(chat.input_box().text(), "a");
    }

    #[test]
    fn test_dispatch_ignores_resize() {
        let mut chat = ChatInterface::new();
        assert_eq!(
            dispatch(&mut chat, vec![TuiEvent::Resize]),
            LoopControl::Continue
        );
        assert!(chat.input_box().text().is_empty());
    }
}
