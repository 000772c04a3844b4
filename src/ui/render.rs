//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the
//! layout helper that splits the screen into header, file list, summary and status line.
//!
//! This module should stay mostly "pure rendering": it reads state and produces widgets,
//! the only thing it hands back to the app is the summary pane height.

use crate::app::AppState;
use crate::core::formatter::display_path;
use crate::ui::icons::DIR_ICON;
use crate::ui::panes;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const HELP_TEXT: &str =
    "↑/↓ navigate • Enter to open • / search • PgUp/PgDn scroll • t toggle dirs • r refresh • q quit";
const SEARCH_HINT: &str = " (ESC to cancel, Enter to confirm)";
const SEARCH_CURSOR: &str = "█";

/// Screen areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Areas {
    pub header: Rect,
    pub files: Rect,
    pub summary: Rect,
    pub status: Rect,
}

/// Splits the screen: one header row, two side by side panes, one status row.
pub fn layout_chunks(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    Areas {
        header: rows[0],
        files: panes[0],
        summary: panes[1],
        status: rows[2],
    }
}

/// Render function which renders the entire terminal UI for parsec on each frame.
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let areas = layout_chunks(frame.area());
    app.set_summary_height(areas.summary.height as usize);

    render_header(frame, app, areas.header);
    panes::draw_file_list(frame, app, areas.files);
    panes::draw_summary(frame, app, areas.summary);
    render_status(frame, app, areas.status);
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let accent = Style::default()
        .fg(Color::Indexed(86))
        .add_modifier(Modifier::BOLD);
    let nav = app.nav();

    let mut spans = vec![Span::styled(
        format!("{} {}", DIR_ICON, display_path(nav.root(), nav.current_dir())),
        accent,
    )];
    if app.is_loading() {
        spans.push(Span::styled(
            "  Loading...",
            Style::default().fg(Color::Indexed(241)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The status row: the search prompt in search mode, the key help otherwise.
pub fn status_spans(app: &AppState) -> Vec<Span<'static>> {
    let muted = Style::default().fg(Color::Indexed(241));
    let search = app.search();
    if search.is_active() {
        vec![
            Span::styled(
                format!("Search: {}{}", search.query(), SEARCH_CURSOR),
                Style::default()
                    .fg(Color::Indexed(86))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(SEARCH_HINT, muted),
        ]
    } else {
        vec![Span::styled(HELP_TEXT, muted)]
    }
}

fn render_status(frame: &mut Frame, app: &AppState, area: Rect) {
    frame.render_widget(Paragraph::new(Line::from(status_spans(app))), area);
}
