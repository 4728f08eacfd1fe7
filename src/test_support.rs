//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::tui::component::Component;

/// A send handler that records every message it receives.
pub fn recording_handler() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
    let sent = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&sent);
    (sent, move |message: &str| {
        sink.borrow_mut().push(message.to_string())
    })
}

/// Render a component into a `width` x `height` test terminal and return its cells as text.
pub fn render_to_string(component: &mut impl Component, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| component.render(f, f.area())).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}
