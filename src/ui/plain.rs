//! Plain-text rendering for `--print` and other non-interactive use.

use std::io::{self, Write};

use crate::controller::{RenderSink, Screen};
use crate::digest::{DigestView, EMPTY_PLACEHOLDER};
use crate::util::sanitize_line;

/// Writes each presented screen as plain text.
///
/// The loading screen is not written. Write errors are logged and the first
/// one is kept for the caller to inspect.
pub struct PlainTextSink<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> PlainTextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_screen(&mut self, screen: &Screen) -> io::Result<()> {
        match screen {
            Screen::Loading => return Ok(()),
            Screen::Error(message) => writeln!(self.out, "{}", message)?,
            Screen::Digest(view) => write_digest(&mut self.out, view)?,
        }
        self.out.flush()
    }
}

impl<W: Write> RenderSink for PlainTextSink<W> {
    fn present(&mut self, screen: &Screen) {
        if let Err(e) = self.write_screen(screen) {
            tracing::warn!(error = %e, "Failed to write board output");
            self.error.get_or_insert(e);
        }
    }
}

fn write_digest(out: &mut impl Write, view: &DigestView) -> io::Result<()> {
    writeln!(
        out,
        "TLDR Board | Updated {} | {} unread",
        sanitize_line(&view.header.updated_label),
        view.header.unread_count
    )?;

    if view.is_empty() {
        writeln!(out)?;
        return writeln!(out, "{}", EMPTY_PLACEHOLDER);
    }

    for category in view.categories() {
        writeln!(out)?;
        writeln!(
            out,
            "== {} ({}) ==",
            sanitize_line(&category.theme),
            category.count_label()
        )?;
        for tile in &category.tiles {
            write!(
                out,
                "  [{}] {}",
                sanitize_line(&tile.display_tag),
                sanitize_line(&tile.title)
            )?;
            if !tile.display_date.is_empty() {
                write!(out, " ({})", sanitize_line(&tile.display_date))?;
            }
            writeln!(out)?;
            let summary = sanitize_line(&tile.summary);
            if !summary.is_empty() {
                writeln!(out, "      {}", summary)?;
            }
            writeln!(
                out,
                "      [{}] [{}] id={}",
                tile.read_label(),
                tile.like_label(),
                sanitize_line(&tile.id)
            )?;
        }
    }
    Ok(())
}
