//! # TUI Components
//!
//! UI components for the chat widget.
//!
//! ## Component Architecture
//!
//! Both components are stateful and event-driven:
//! - `InputBox`: auto-resizing text input that submits on Enter
//! - `ChatInterface`: container that reserves the history area and embeds the `InputBox`
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props" (constructor arguments and builder
//! methods), not by reaching into global state. The `InputBox` send callback is the
//! clearest case: the parent decides what happens to a message, the input box only
//! decides when a message is ready.
//!
//! ```rust,ignore
//! let input = InputBox::new(|message| log::info!("{message}"))
//!     .with_max_visible_lines(5);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── chat_interface.rs  (container)
//! └── input_box/         (text input, cursor tracking, wrap measurement)
//! ```

pub mod chat_interface;
pub mod input_box;

pub use chat_interface::ChatInterface;
pub use input_box::{InputBox, InputEvent};
