//! Frame layout: header, body and status bar, plus the help overlay.

use crate::app::App;
use crate::controller::{Screen, LOADING_MESSAGE};
use crate::digest::{DigestView, EMPTY_PLACEHOLDER, NO_TIMESTAMP_LABEL};
use crate::util::sanitize_line;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{board, help, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 8;

pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    status::render(f, app, chunks[2]);

    if app.show_help {
        help::render(f);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let (updated, unread) = match app.digest() {
        Some(view) => (
            sanitize_line(&view.header.updated_label),
            Some(view.header.unread_count),
        ),
        None => (NO_TIMESTAMP_LABEL.to_string(), None),
    };

    let mut spans = vec![Span::styled(
        format!("Updated {}", updated),
        Style::default().fg(Color::Gray),
    )];
    if let Some(unread) = unread {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("{} unread", unread),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        format!("[a] {}", app.controller.archive_toggle_label()),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" TLDR Board ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    match app.screen() {
        Screen::Loading => render_placeholder(f, area, LOADING_MESSAGE, Color::Gray),
        Screen::Error(message) => render_placeholder(f, area, message, Color::Red),
        Screen::Digest(view) if view.is_empty() => {
            render_placeholder(f, area, EMPTY_PLACEHOLDER, Color::Gray)
        }
        Screen::Digest(view) => render_board(f, app, view, area),
    }
}

fn render_placeholder(f: &mut Frame, area: Rect, text: &str, color: Color) {
    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let top = area.height / 3;
    let inner = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };
    f.render_widget(paragraph, inner);
}

fn render_board(f: &mut Frame, app: &App, view: &DigestView, area: Rect) {
    let content = board::board_lines(view, app.selected, area.width as usize);
    let scroll = content.scroll_for(area.height as usize);
    // ratatui scroll offsets are u16
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(content.lines).scroll((scroll, 0));
    f.render_widget(paragraph, area);
}
