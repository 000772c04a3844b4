//! Application state and main controller module for parsec.
//!
//! This module defines the [AppState] struct, which owns every piece of mutable state while
//! parsec is running:
//! - Configuration (loaded from parsec.toml) and the keymap built from it
//! - The navigation state, the search state and the summary pane
//! - Communication with the worker threads via crossbeam_channel
//!
//! Worker results are applied in [AppState::tick], on the event loop thread. A summary or
//! directory preview is only applied when it was computed for the entry that is selected at
//! that moment and answers the latest request. Anything else is dropped.

use crate::app::keymap::{Action, Keymap};
use crate::app::summary::NO_SELECTION_TEXT;
use crate::app::{NavState, SearchState, SummaryPane};
use crate::config::Config;
use crate::core::classify::classify;
use crate::core::formatter::{parent_message, summary_text, unsupported_message};
use crate::core::summarize::Summarizer;
use crate::core::worker::{WorkerResponse, WorkerTask, Workers};

use crossterm::event::KeyEvent;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of a single processed keypress.
#[derive(Debug, PartialEq)]
pub enum KeypressResult {
    Continue,
    Consumed,
    Quit,
}

/// Main struct which holds the central application state of parsec.
///
/// Functions are provided for the event loop, input handling, directory navigation and
/// worker requests.
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,

    pub(super) nav: NavState,
    pub(super) search: SearchState,
    pub(super) summary: SummaryPane,

    pub(super) workers: Workers,
    pub(super) is_loading: bool,
}

impl<'a> AppState<'a> {
    pub fn new(config: &'a Config) -> std::io::Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::from_dir(config, &current_dir)
    }

    /// Starts browsing at `root`. The directory becomes the browsing root: no `..` entry is
    /// offered above it.
    pub fn from_dir(config: &'a Config, root: &Path) -> std::io::Result<Self> {
        let root = if root.is_dir() {
            root.to_path_buf()
        } else {
            std::env::current_dir()?
        };

        let summarizer = Arc::new(Summarizer::new(config.general().summary_options()));

        let mut app = Self {
            config,
            keymap: Keymap::from_config(config),
            nav: NavState::new(root, config.general().show_dirs()),
            search: SearchState::default(),
            summary: SummaryPane::default(),
            workers: Workers::spawn(summarizer),
            is_loading: false,
        };

        app.request_dir_load(None);
        Ok(app)
    }

    // Getters/ accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    #[inline]
    pub fn summary(&self) -> &SummaryPane {
        &self.summary
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Called by the renderer once the layout is known.
    pub fn set_summary_height(&mut self, height: usize) {
        self.summary.set_height(height);
    }

    /// Drains all finished worker results.
    ///
    /// Is used by the main event loop once per iteration.
    /// Returns `true` if anything visible changed and the UI should be redrawn.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        while let Ok(response) = self.workers.response_rx().try_recv() {
            changed |= self.apply_response(response);
        }
        changed
    }

    /// Applies one worker result, or drops it if it is stale.
    /// Returns `true` if the state changed.
    pub fn apply_response(&mut self, response: WorkerResponse) -> bool {
        match response {
            WorkerResponse::DirectoryLoaded {
                path,
                entries,
                focus,
                request_id,
            } => {
                // only update nav if BOTH the ID and path match.
                if request_id != self.nav.request_id() || path != self.nav.current_dir() {
                    log::debug!("dropping stale listing of {}", path.display());
                    return false;
                }
                self.nav.update_from_worker(path, entries, focus);
                self.after_listing();
                true
            }
            WorkerResponse::DirectoryFailed {
                path,
                error,
                request_id,
            } => {
                if request_id != self.nav.request_id() || path != self.nav.current_dir() {
                    return false;
                }
                log::warn!("cannot list {}: {}", path.display(), error);
                let Some(fallback) = self.nav.fallback_dir(&path) else {
                    self.nav.update_from_worker(path, Vec::new(), None);
                    self.after_listing();
                    return true;
                };

                // Back on the listing still on screen the cursor stays where it was
                let focus = if fallback == self.nav.listed_dir() {
                    self.nav.selected_entry().map(|e| e.name().to_os_string())
                } else {
                    None
                };
                log::debug!("falling back to {}", fallback.display());
                self.search.cancel();
                self.nav.set_path(fallback);
                self.request_dir_load(focus);
                true
            }
            WorkerResponse::SummaryReady {
                path,
                summary,
                request_id,
            } => {
                if !self.is_current_summary(&path, request_id) {
                    log::debug!("dropping stale summary of {}", path.display());
                    return false;
                }
                self.summary.set_content(summary_text(&summary));
                true
            }
            WorkerResponse::DirectoryPreview {
                path,
                text,
                request_id,
            } => {
                if !self.is_current_summary(&path, request_id) {
                    log::debug!("dropping stale preview of {}", path.display());
                    return false;
                }
                self.summary.set_content(text);
                true
            }
        }
    }

    /// Central key handler.
    ///
    /// In search mode keys edit the query, otherwise they are looked up in the keymap.
    /// Afterwards the entry under the cursor is checked for a selection change.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        let result = if self.search.is_active() {
            self.handle_search_input(key)
        } else if let Some(action) = self.keymap.lookup(key) {
            match action {
                Action::System(sys_act) => self.handle_sys_action(sys_act),
                Action::Nav(nav_act) => self.handle_nav_action(nav_act),
                Action::Summary(sum_act) => self.handle_summary_action(sum_act),
            }
        } else {
            KeypressResult::Continue
        };

        if result != KeypressResult::Quit {
            self.sync_selection();
        }
        result
    }

    // Selection handling

    /// Handles the entry under the cursor if it differs from the last handled one.
    pub(super) fn sync_selection(&mut self) {
        let path = self.nav.cursor_path();
        if self.nav.record_selection(path) {
            self.on_selection_change();
        }
    }

    /// Issues exactly one update of the summary pane for the entry under the cursor.
    fn on_selection_change(&mut self) {
        // Invalidates whatever the pane was waiting for
        self.summary.prepare_new_request();

        let Some(entry) = self.nav.selected_entry() else {
            self.summary.set_content(NO_SELECTION_TEXT.to_string());
            return;
        };

        let name = entry.name_str().into_owned();
        if entry.is_parent() {
            let text = parent_message(self.nav.root(), self.nav.listed_dir());
            self.summary.set_content(text);
        } else if entry.is_dir() {
            let path = self.nav.listed_dir().join(entry.name());
            self.request_dir_preview(path);
        } else if entry.is_executable() || classify(&name).is_supported() {
            self.summary.set_loading();
            self.request_summary(name);
        } else {
            self.summary.set_content(unsupported_message(&name));
        }
    }

    fn is_current_summary(&self, path: &Path, request_id: u64) -> bool {
        request_id == self.summary.request_id() && self.nav.selected_path() == Some(path)
    }

    /// Brings the displayed set in line with search mode and handles the new cursor entry.
    fn after_listing(&mut self) {
        self.is_loading = false;
        if self.search.is_active() && !self.search.query().is_empty() {
            self.nav.apply_filter(self.search.query());
        }
        let path = self.nav.cursor_path();
        self.nav.record_selection(path);
        self.on_selection_change();
    }

    // Worker requests functions for directory loading, summaries and directory previews

    /// Requests a directory load for the current navigation directory
    pub fn request_dir_load(&mut self, focus: Option<OsString>) {
        self.is_loading = true;
        let request_id = self.nav.prepare_new_request();
        let _ = self.workers.io_tx().try_send(WorkerTask::LoadDirectory {
            path: self.nav.current_dir().to_path_buf(),
            root: self.nav.root().to_path_buf(),
            focus,
            request_id,
        });
    }

    /// Requests a summary of the file `name` in the current directory.
    fn request_summary(&mut self, name: String) {
        let request_id = self.summary.request_id();
        let _ = self.workers.summary_tx().try_send(WorkerTask::Summarize {
            dir: self.nav.listed_dir().to_path_buf(),
            name,
            request_id,
        });
    }

    /// Requests a listing preview of the directory at `path`.
    fn request_dir_preview(&mut self, path: PathBuf) {
        let general = self.config.general();
        let request_id = self.summary.request_id();
        let _ = self
            .workers
            .summary_tx()
            .try_send(WorkerTask::PreviewDirectory {
                path,
                root: self.nav.root().to_path_buf(),
                max_items: general.max_dir_preview(),
                icons: general.icons(),
                request_id,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::summary::{INITIAL_TEXT, LOADING_TEXT};

    use crossterm::event::{KeyCode, KeyModifiers};
    use std::fs;
    use std::time::{Duration, Instant};
    use tempfile::tempdir;

    fn press(app: &mut AppState, code: KeyCode) -> KeypressResult {
        app.handle_keypress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Ticks until `done` holds or two seconds have passed.
    fn tick_until(app: &mut AppState, done: impl Fn(&AppState) -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            app.tick();
            if done(app) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn from_dir_lists_the_root_without_parent_entry() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::write(temp.path().join("notes.txt"), "hello\n")?;

        let mut app = AppState::from_dir(&config, temp.path())?;
        assert!(app.is_loading());
        assert_eq!(app.summary().content(), INITIAL_TEXT);
        assert!(tick_until(&mut app, |a| !a.is_loading()));

        assert_eq!(app.nav().current_dir(), temp.path());
        assert_eq!(app.nav().shown_len(), 1);
        assert_eq!(
            app.nav().selected_path(),
            Some(temp.path().join("notes.txt").as_path())
        );
        Ok(())
    }

    #[test]
    fn unknown_key_continues() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        let mut app = AppState::from_dir(&config, temp.path())?;
        assert_eq!(press(&mut app, KeyCode::Null), KeypressResult::Continue);
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeypressResult::Quit);
        Ok(())
    }

    #[test]
    fn empty_directory_shows_no_selection() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        let mut app = AppState::from_dir(&config, temp.path())?;
        assert!(tick_until(&mut app, |a| !a.is_loading()));
        assert_eq!(app.summary().content(), NO_SELECTION_TEXT);
        Ok(())
    }

    #[test]
    fn unsupported_file_is_reported_synchronously() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::write(temp.path().join("photo.png"), [0u8, 1, 2])?;

        let mut app = AppState::from_dir(&config, temp.path())?;
        assert!(tick_until(&mut app, |a| !a.is_loading()));
        assert!(app.summary().content().contains("photo.png"));
        assert!(app.summary().content().contains("not supported"));
        Ok(())
    }

    #[test]
    fn summary_for_selection_is_applied() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::write(temp.path().join("main.go"), "package main\n\nfunc Foo() {}\n")?;

        let mut app = AppState::from_dir(&config, temp.path())?;
        assert!(tick_until(&mut app, |a| !a.is_loading()));
        assert!(tick_until(&mut app, |a| !a.summary().is_loading()));
        assert!(app.summary().content().contains("Functions: 1"));
        Ok(())
    }

    #[test]
    fn summary_for_other_path_is_dropped() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::write(temp.path().join("a.txt"), "a\n")?;
        fs::write(temp.path().join("b.txt"), "b\n")?;

        let mut app = AppState::from_dir(&config, temp.path())?;
        assert!(tick_until(&mut app, |a| !a.is_loading()));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.summary().content(), LOADING_TEXT);

        let stale = Summarizer::default().summarize(temp.path(), "a.txt");
        let applied = app.apply_response(WorkerResponse::SummaryReady {
            path: temp.path().join("a.txt"),
            summary: stale,
            request_id: app.summary().request_id(),
        });
        assert!(!applied);
        assert_eq!(app.summary().content(), LOADING_TEXT);
        Ok(())
    }

    #[test]
    fn summary_with_old_request_id_is_dropped() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::write(temp.path().join("a.txt"), "a\n")?;

        let mut app = AppState::from_dir(&config, temp.path())?;
        assert!(tick_until(&mut app, |a| !a.is_loading()));

        let summary = Summarizer::default().summarize(temp.path(), "a.txt");
        let applied = app.apply_response(WorkerResponse::SummaryReady {
            path: temp.path().join("a.txt"),
            summary,
            request_id: app.summary().request_id().wrapping_sub(1),
        });
        assert!(!applied);
        Ok(())
    }

    #[test]
    fn enter_and_leave_directory_restores_focus() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::write(temp.path().join("a.txt"), "a\n")?;
        fs::create_dir(temp.path().join("sub"))?;
        fs::write(temp.path().join("sub").join("inner.md"), "# Inner\n")?;

        let mut app = AppState::from_dir(&config, temp.path())?;
        assert!(tick_until(&mut app, |a| !a.is_loading()));

        press(&mut app, KeyCode::End);
        assert_eq!(
            app.nav().selected_entry().map(|e| e.name_str().into_owned()),
            Some("sub".to_string())
        );
        assert!(tick_until(&mut app, |a| a.summary().content().contains("inner.md")));

        press(&mut app, KeyCode::Enter);
        assert!(tick_until(&mut app, |a| !a.is_loading()));
        assert_eq!(app.nav().current_dir(), temp.path().join("sub"));
        assert!(app.nav().selected_entry().is_some_and(|e| e.is_parent()));
        assert!(app.summary().content().contains("Parent Directory"));

        press(&mut app, KeyCode::Enter);
        assert!(tick_until(&mut app, |a| !a.is_loading()));
        assert_eq!(app.nav().current_dir(), temp.path());
        assert_eq!(
            app.nav().selected_entry().map(|e| e.name_str().into_owned()),
            Some("sub".to_string())
        );
        Ok(())
    }

    #[test]
    fn failed_root_listing_leaves_an_empty_list() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::write(temp.path().join("a.txt"), "a\n")?;

        let mut app = AppState::from_dir(&config, temp.path())?;
        assert!(tick_until(&mut app, |a| !a.is_loading()));

        let applied = app.apply_response(WorkerResponse::DirectoryFailed {
            path: temp.path().to_path_buf(),
            error: "permission denied".to_string(),
            request_id: app.nav().request_id(),
        });
        assert!(applied);
        assert!(!app.is_loading());
        assert_eq!(app.nav().shown_len(), 0);
        assert_eq!(app.summary().content(), NO_SELECTION_TEXT);
        Ok(())
    }

    #[test]
    fn enter_on_file_is_a_noop() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = tempdir()?;
        fs::write(temp.path().join("a.txt"), "a\n")?;

        let mut app = AppState::from_dir(&config, temp.path())?;
        assert!(tick_until(&mut app, |a| !a.is_loading()));
        let id = app.nav().request_id();
        press(&mut app, KeyCode::Enter);
        assert!(!app.is_loading());
        assert_eq!(app.nav().request_id(), id);
        Ok(())
    }
}
