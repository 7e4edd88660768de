//! Keyboard input handling for the board.

use crate::app::{App, AppEvent};
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::Action;

/// Route one key press. The help overlay captures all keys while open.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if app.show_help {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return Action::Continue;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Tab => app.select_next_category(),
        KeyCode::BackTab => app.select_prev_category(),

        KeyCode::Char('r') => app.refresh(event_tx),
        KeyCode::Char('a') => app.toggle_show_archived(event_tx),
        KeyCode::Char('x') | KeyCode::Enter => app.mark_selected_read().await,
        KeyCode::Char('l') => app.toggle_selected_liked().await,
        _ => {}
    }
    Action::Continue
}

/// Key reference shown in the help overlay.
pub(super) const KEY_HELP: &[(&str, &str)] = &[
    ("j / Down", "Next tile"),
    ("k / Up", "Previous tile"),
    ("g / G", "First / last tile"),
    ("Tab / S-Tab", "Next / previous category"),
    ("x / Enter", "Archive selected tile"),
    ("l", "Like / unlike selected tile"),
    ("a", "Show / hide archived tiles"),
    ("r", "Refresh"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];
