use crate::app::App;
use crate::controller::LoadState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        match app.controller.load_state() {
            LoadState::Rendered => Cow::Owned(format!(
                "{}/{} [j/k]move [Tab]category [x]archive [l]ike [a]rchived [r]efresh [?]help [q]uit",
                (app.selected + 1).min(app.visible_count()),
                app.visible_count()
            )),
            LoadState::Loading | LoadState::Idle => Cow::Borrowed("Loading... [q]uit"),
            LoadState::Error => Cow::Borrowed("[r]efresh [a]rchived [q]uit"),
        }
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}
