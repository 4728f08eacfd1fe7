use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Handled by the host loop
    Quit,
    Resize,

    // Routed to the chat interface
    Submit,
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    DeleteWordBack,
    CursorLeft,
    CursorRight,
    CursorWordLeft,
    CursorWordRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> std::io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        Ok(translate(event::read()?))
    } else {
        Ok(None)
    }
}

/// Translate a raw crossterm event into a `TuiEvent`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Map a key press to a `TuiEvent`.
///
/// Enter submits unless Shift is held, in which case it inserts a line break.
/// Terminals without the kitty keyboard protocol can't report Shift+Enter, so
/// Ctrl+J (ASCII LF) inserts a line break as well.
pub fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too; only presses and repeats edit text
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key_event.modifiers.contains(KeyModifiers::SHIFT);

    match key_event.code {
        KeyCode::Char('c') if ctrl => Some(TuiEvent::Quit),
        KeyCode::Char('j') if ctrl => Some(TuiEvent::InputChar('\n')),
        KeyCode::Char('w') if ctrl => Some(TuiEvent::DeleteWordBack),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Enter if shift => Some(TuiEvent::InputChar('\n')),
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Left if ctrl => Some(TuiEvent::CursorWordLeft),
        KeyCode::Right if ctrl => Some(TuiEvent::CursorWordRight),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Up => Some(TuiEvent::CursorUp),
        KeyCode::Down => Some(TuiEvent::CursorDown),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::Esc => Some(TuiEvent::Quit),
        _ => None,
    }
}
