//! Terminal User Interface module.
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `render` - Frame layout and placeholder screens
//! - `board` - Category sections and tiles
//! - `status` - Status bar widget
//! - `help` - Key reference overlay
//! - `plain` - Plain-text sink for non-interactive output

mod board;
mod help;
mod input;
mod loop_runner;
mod plain;
mod render;
mod status;

pub use loop_runner::{run, Action};
pub use plain::PlainTextSink;
