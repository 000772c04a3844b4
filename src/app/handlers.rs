//! Key handlers for parsec.
//!
//! Implements the search mode input and the per-action handlers which [AppState] dispatches
//! to from its keymap lookup.

use crate::app::keymap::{NavAction, SummaryAction, SystemAction};
use crate::app::{AppState, KeypressResult};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl<'a> AppState<'a> {
    /// Handles a key while search mode is active.
    ///
    /// Printable characters extend the query, Backspace shortens it, Enter leaves search mode
    /// keeping the filter and Esc leaves it showing the full listing again.
    pub(super) fn handle_search_input(&mut self, key: KeyEvent) -> KeypressResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => KeypressResult::Quit,
                _ => KeypressResult::Consumed,
            };
        }

        match key.code {
            KeyCode::Esc => {
                self.search.cancel();
                self.nav.clear_filter();
            }
            KeyCode::Enter => self.search.confirm(),
            KeyCode::Backspace => {
                if self.search.backspace() {
                    self.refilter();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                if self.search.push(c) {
                    self.refilter();
                }
            }
            _ => {}
        }
        KeypressResult::Consumed
    }

    /// Handles navigation actions (cursor movement and opening directories).
    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        let step = self.config.general().page_step() as isize;
        match action {
            NavAction::Up => {
                self.nav.move_up();
            }
            NavAction::Down => {
                self.nav.move_down();
            }
            NavAction::Top => {
                self.nav.move_to_top();
            }
            NavAction::Bottom => {
                self.nav.move_to_bottom();
            }
            NavAction::PageUp => {
                self.nav.move_by(-step);
            }
            NavAction::PageDown => {
                self.nav.move_by(step);
            }
            NavAction::Open => return self.handle_open(),
        }
        KeypressResult::Continue
    }

    pub(super) fn handle_summary_action(&mut self, action: SummaryAction) -> KeypressResult {
        let step = self.config.general().summary_scroll_step() as isize;
        match action {
            SummaryAction::ScrollUp => self.summary.scroll_by(-step),
            SummaryAction::ScrollDown => self.summary.scroll_by(step),
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => return KeypressResult::Quit,
            SystemAction::Search => self.search.enter(),
            SystemAction::Refresh => {
                let focus = self.nav.selected_entry().map(|e| e.name().to_os_string());
                self.request_dir_load(focus);
            }
            SystemAction::ToggleDirs => self.nav.toggle_dirs(),
        }
        KeypressResult::Continue
    }

    /// Handles Enter while browsing.
    ///
    /// On a directory entry the current directory changes and a fresh listing is requested.
    /// Leaving a directory through `..` puts the cursor back on the directory we came from.
    /// On a file nothing happens, the selection already drives the summary.
    fn handle_open(&mut self) -> KeypressResult {
        let Some(entry) = self.nav.selected_entry() else {
            return KeypressResult::Continue;
        };
        if !entry.is_dir() {
            return KeypressResult::Continue;
        }

        let (target, focus) = if entry.is_parent() {
            let Some(parent) = self.nav.parent_dir() else {
                return KeypressResult::Continue;
            };
            let exited = self.nav.listed_dir().file_name().map(|n| n.to_os_string());
            (parent, exited)
        } else {
            (self.nav.listed_dir().join(entry.name()), None)
        };

        log::debug!("entering {}", target.display());
        // A kept filter belongs to the directory we are leaving
        self.search.cancel();
        self.nav.set_path(target);
        self.request_dir_load(focus);
        KeypressResult::Continue
    }

    /// Re-runs the fuzzy filter for the current query, or drops it once the query is empty.
    fn refilter(&mut self) {
        if self.search.query().is_empty() {
            self.nav.clear_filter();
        } else {
            self.nav.apply_filter(self.search.query());
        }
    }
}
