//! Category sections and tiles, laid out as scrollable lines.

use crate::digest::{CategoryView, DigestView, TileView};
use crate::util::{sanitize_line, truncate_to_width, wrap_to_width};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Summary lines shown per tile.
const SUMMARY_LINES: usize = 2;
const INDENT: &str = "    ";

/// The board as lines, plus the line range of the selected tile.
pub(super) struct BoardLines {
    pub lines: Vec<Line<'static>>,
    pub selected_range: Option<(usize, usize)>,
}

impl BoardLines {
    /// Scroll offset that keeps the selected tile in a viewport of `height`.
    pub fn scroll_for(&self, height: usize) -> usize {
        match self.selected_range {
            Some((start, end)) if end > height => (end - height).min(start),
            _ => 0,
        }
    }
}

pub(super) fn board_lines(view: &DigestView, selected: usize, width: usize) -> BoardLines {
    let mut lines = Vec::new();
    let mut selected_range = None;
    let mut tile_index = 0;

    for category in view.categories() {
        lines.push(category_header(category, width));

        if category.tiles.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("{}All archived", INDENT),
                Style::default().fg(Color::DarkGray),
            )));
        }

        for tile in &category.tiles {
            let start = lines.len();
            let is_selected = tile_index == selected;
            push_tile(&mut lines, tile, is_selected, width);
            if is_selected {
                selected_range = Some((start, lines.len()));
            }
            tile_index += 1;
        }
        lines.push(Line::default());
    }

    BoardLines {
        lines,
        selected_range,
    }
}

fn category_header(category: &CategoryView, width: usize) -> Line<'static> {
    let theme = sanitize_line(&category.theme);
    let count = format!("  {}", category.count_label());
    let theme = truncate_to_width(&theme, width.saturating_sub(count.len())).into_owned();
    Line::from(vec![
        Span::styled(
            theme,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(count, Style::default().fg(Color::DarkGray)),
    ])
}

fn push_tile(lines: &mut Vec<Line<'static>>, tile: &TileView, is_selected: bool, width: usize) {
    let marker = if is_selected { "> " } else { "  " };
    let tag = format!("[{}] ", sanitize_line(&tile.display_tag));
    let title_room = width.saturating_sub(marker.len() + tag.chars().count());
    let title = truncate_to_width(&sanitize_line(&tile.title), title_room).into_owned();

    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
    if tile.is_read {
        title_style = title_style.fg(Color::DarkGray).remove_modifier(Modifier::BOLD);
    }
    if is_selected {
        title_style = title_style.add_modifier(Modifier::REVERSED);
    }

    lines.push(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(tag, Style::default().fg(Color::Blue)),
        Span::styled(title, title_style),
    ]));

    let mut meta = vec![Span::raw(INDENT)];
    if !tile.display_date.is_empty() {
        meta.push(Span::styled(
            format!("{}  ", sanitize_line(&tile.display_date)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let read_style = if tile.is_read {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let like_style = if tile.is_liked {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    meta.push(Span::styled(format!("[{}]", tile.read_label()), read_style));
    meta.push(Span::raw(" "));
    meta.push(Span::styled(format!("[{}]", tile.like_label()), like_style));
    lines.push(Line::from(meta));

    let summary = sanitize_line(&tile.summary);
    for text in wrap_to_width(&summary, width.saturating_sub(INDENT.len()), SUMMARY_LINES) {
        lines.push(Line::from(vec![Span::raw(INDENT), Span::raw(text)]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{DigestBody, DigestHeader};
    use pretty_assertions::assert_eq;

    fn tile(id: &str, summary: &str, is_read: bool) -> TileView {
        TileView {
            id: id.into(),
            title: format!("Title {}", id),
            summary: summary.into(),
            display_tag: "TLDR".into(),
            display_date: "Oct 18, 2026".into(),
            is_read,
            is_liked: false,
        }
    }

    fn view(categories: Vec<CategoryView>) -> DigestView {
        DigestView {
            header: DigestHeader {
                updated_label: "Oct 18, 2026".into(),
                unread_count: 0,
            },
            body: DigestBody::Categories(categories),
        }
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_tile_lines_show_labels_and_summary() {
        let v = view(vec![CategoryView {
            theme: "AI".into(),
            tile_count: 1,
            tiles: vec![tile("a", "A short summary", false)],
        }]);
        let board = board_lines(&v, 0, 60);
        let rendered: Vec<String> = board.lines.iter().map(text).collect();

        assert_eq!(rendered[0], "AI  1 tiles");
        assert_eq!(rendered[1], "> [TLDR] Title a");
        assert_eq!(rendered[2], "    Oct 18, 2026  [Archive] [Like]");
        assert_eq!(rendered[3], "    A short summary");
        assert_eq!(board.selected_range, Some((1, 4)));
    }

    #[test]
    fn test_fully_archived_category_gets_placeholder_line() {
        let v = view(vec![CategoryView {
            theme: "World".into(),
            tile_count: 2,
            tiles: vec![],
        }]);
        let board = board_lines(&v, 0, 60);
        assert_eq!(text(&board.lines[0]), "World  2 tiles");
        assert_eq!(text(&board.lines[1]), "    All archived");
        assert_eq!(board.selected_range, None);
    }

    #[test]
    fn test_selection_spans_categories() {
        let v = view(vec![
            CategoryView {
                theme: "AI".into(),
                tile_count: 1,
                tiles: vec![tile("a", "", false)],
            },
            CategoryView {
                theme: "Misc".into(),
                tile_count: 1,
                tiles: vec![tile("m", "", true)],
            },
        ]);
        let board = board_lines(&v, 1, 60);
        let (start, _) = board.selected_range.unwrap();
        assert_eq!(text(&board.lines[start]), "> [TLDR] Title m");
        assert!(text(&board.lines[start + 1]).contains("[Archived]"));
    }

    #[test]
    fn test_scroll_keeps_selection_visible() {
        let board = BoardLines {
            lines: vec![Line::default(); 50],
            selected_range: Some((30, 34)),
        };
        assert_eq!(board.scroll_for(40), 0);
        assert_eq!(board.scroll_for(10), 24);
        // Tile taller than the viewport: keep its first line visible
        assert_eq!(board.scroll_for(2), 30);
    }

    #[test]
    fn test_control_sequences_are_stripped() {
        let mut t = tile("x", "", false);
        t.title = "\x1b[31mEvil\x1b[0m title".into();
        let v = view(vec![CategoryView {
            theme: "AI".into(),
            tile_count: 1,
            tiles: vec![t],
        }]);
        let board = board_lines(&v, 5, 60);
        assert_eq!(text(&board.lines[1]), "  [TLDR] Evil title");
    }
}
