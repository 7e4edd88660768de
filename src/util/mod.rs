//! Text helpers for terminal rendering.
//!
//! Unicode-aware width measurement, truncation and wrapping, plus removal
//! of control sequences from untrusted feed text.

mod text;

pub use text::{
    display_width, sanitize_line, strip_control_chars, truncate_to_width, wrap_to_width,
};
