//! UI pane drawing module for parsec.
//!
//! Draws the file list pane and the summary pane. The row, window and footer helpers are
//! plain functions so the file list layout can be checked without a terminal.
//!
//! Used internally by ui::render

use crate::app::AppState;
use crate::core::fm::Entry;
use crate::core::formatter::truncate_to_width;
use crate::ui::icons::entry_icon;

use ansi_to_tui::IntoText;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

const EMPTY_LIST_TEXT: &str = "No files found...";
const DIRS_HIDDEN_HINT: &str = " (dirs hidden - press 't' to toggle)";

/// Columns of a row taken by the cursor, check box, icon and padding.
const ROW_CHROME: usize = 15;

const BORDER_COLOR: Color = Color::Indexed(62);
const ACCENT_COLOR: Color = Color::Indexed(86);
const MUTED_COLOR: Color = Color::Indexed(241);

/// Block shared by both panes.
fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
        ))
}

/// Range of rows `[start, end)` that fits `height` rows with the cursor kept centered.
pub fn visible_window(selected: usize, len: usize, height: usize) -> (usize, usize) {
    if len <= height {
        return (0, len);
    }
    let start = selected.saturating_sub(height / 2);
    let end = (start + height).min(len);
    (end.saturating_sub(height), end)
}

/// One file list row: cursor marker, check box, icon and the name cut to the pane width.
pub fn file_row(entry: &Entry, is_cursor: bool, is_checked: bool, width: usize) -> String {
    let cursor = if is_cursor { "> " } else { "  " };
    let check = if is_checked { "✓" } else { " " };
    let name = entry.name_str();
    let max_name = width.saturating_sub(ROW_CHROME);
    let name = if max_name > 0 {
        truncate_to_width(&name, max_name).into_owned()
    } else {
        name.into_owned()
    };
    format!("{}[{}] {} {}", cursor, check, entry_icon(entry), name)
}

/// The file count line under the list.
pub fn footer_text(shown: usize, show_dirs: bool) -> String {
    let mut footer = format!("{} files", shown);
    if !show_dirs {
        footer.push_str(DIRS_HIDDEN_HINT);
    }
    footer
}

/// Draws the file list pane.
///
/// The last row of the pane holds the file count footer.
pub fn draw_file_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let nav = app.nav();
    let block = pane_block("Files");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let shown_len = nav.shown_len();
    let footer_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };
    let list_area = Rect {
        height: inner.height - 1,
        ..inner
    };

    frame.render_widget(
        Paragraph::new(Span::styled(
            footer_text(shown_len, nav.show_dirs()),
            Style::default().fg(MUTED_COLOR),
        )),
        footer_area,
    );

    if shown_len == 0 {
        frame.render_widget(Paragraph::new(EMPTY_LIST_TEXT), list_area);
        return;
    }

    let selected = nav.selected_idx();
    let (start, end) = visible_window(selected, shown_len, list_area.height as usize);
    let width = area.width as usize;

    let items: Vec<ListItem> = nav
        .shown_entries()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(idx, entry)| {
            let is_cursor = idx == selected;
            let is_checked = nav
                .selected_path()
                .is_some_and(|p| p == nav.listed_dir().join(entry.name()));
            let style = if entry.is_dir() {
                Style::default().fg(Color::Blue)
            } else {
                Style::default()
            };
            ListItem::new(Line::styled(
                file_row(entry, is_cursor, is_checked, width),
                style,
            ))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(selected - start));

    frame.render_stateful_widget(
        List::new(items).highlight_style(
            Style::default()
                .fg(ACCENT_COLOR)
                .bg(Color::Indexed(237))
                .add_modifier(Modifier::BOLD),
        ),
        list_area,
        &mut state,
    );
}

/// Draws the summary pane: the current summary text, scrolled to the pane's position.
///
/// The text may carry ANSI styling from the markdown renderer or the section titles.
pub fn draw_summary(frame: &mut Frame, app: &AppState, area: Rect) {
    let pane = app.summary();
    let title = if pane.max_scroll() > 0 {
        format!("Summary {}/{}", pane.scroll(), pane.max_scroll())
    } else {
        "Summary".to_string()
    };

    let raw = pane.content();
    let text = raw.into_text().unwrap_or_else(|_| Text::from(raw.to_string()));
    let scroll = u16::try_from(pane.scroll()).unwrap_or(u16::MAX);

    frame.render_widget(
        Paragraph::new(text)
            .block(pane_block(&title))
            .scroll((scroll, 0)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_cursor_centered() {
        assert_eq!(visible_window(3, 5, 10), (0, 5));
        assert_eq!(visible_window(0, 50, 10), (0, 10));
        assert_eq!(visible_window(20, 50, 10), (15, 25));
        assert_eq!(visible_window(49, 50, 10), (40, 50));
    }

    #[test]
    fn rows_show_cursor_check_and_icon() {
        let entry = Entry::synthetic("main.go", false);
        assert_eq!(file_row(&entry, true, true, 80), "> [✓] 🐹 main.go");
        assert_eq!(file_row(&entry, false, false, 80), "  [ ] 🐹 main.go");
        assert_eq!(
            file_row(&Entry::synthetic("docs", true), false, false, 80),
            "  [ ] 📁 docs"
        );
    }

    #[test]
    fn long_names_are_cut() {
        let entry = Entry::synthetic("a_very_long_file_name_indeed.txt", false);
        let row = file_row(&entry, false, false, 25);
        assert!(row.ends_with("a_very_..."));
    }

    #[test]
    fn footer_mentions_hidden_dirs() {
        assert_eq!(footer_text(2, true), "2 files");
        assert_eq!(
            footer_text(2, false),
            "2 files (dirs hidden - press 't' to toggle)"
        );
    }
}
