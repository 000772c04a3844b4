//! Navigation state and file list logic for parsec.
//!
//! Holds the browsing root, the current directory, the full listing and the displayed subset,
//! and the cursor. The displayed subset is the search result (or the full listing) with
//! directories removed while they are toggled off. The `..` entry is never hidden.

use crate::core::fm::Entry;
use crate::core::fuzzy;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Holds the navigation, selection and file list state.
pub struct NavState {
    root: PathBuf,
    current_dir: PathBuf,
    /// Directory the current listing was read from.
    listed_dir: PathBuf,
    all_entries: Vec<Entry>,
    filtered: Vec<Entry>,
    show_dirs: bool,
    selected: usize,
    selected_path: Option<PathBuf>,
    request_id: u64,
}

impl NavState {
    /// Creates the state for browsing `root`, starting at `root` itself.
    pub fn new(root: PathBuf, show_dirs: bool) -> Self {
        Self {
            current_dir: root.clone(),
            listed_dir: root.clone(),
            root,
            all_entries: Vec::new(),
            filtered: Vec::new(),
            show_dirs,
            selected: 0,
            selected_path: None,
            request_id: 0,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn listed_dir(&self) -> &Path {
        &self.listed_dir
    }

    #[inline]
    pub fn all_entries(&self) -> &[Entry] {
        &self.all_entries
    }

    /// The search result, or the full listing when no filter is applied.
    #[inline]
    pub fn filtered_entries(&self) -> &[Entry] {
        &self.filtered
    }

    #[inline]
    pub fn show_dirs(&self) -> bool {
        self.show_dirs
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    /// Absolute path of the entry the last selection change was handled for.
    #[inline]
    pub fn selected_path(&self) -> Option<&Path> {
        self.selected_path.as_deref()
    }

    #[inline]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Entries as they appear in the file list.
    pub fn shown_entries(&self) -> impl Iterator<Item = &Entry> {
        self.filtered
            .iter()
            .filter(move |e| self.show_dirs || e.is_parent() || !e.is_dir())
    }

    pub fn shown_len(&self) -> usize {
        self.shown_entries().count()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.shown_entries().nth(self.selected)
    }

    /// Absolute path of the entry under the cursor. Entries belong to the listed directory,
    /// which lags behind `current_dir` while a listing is pending.
    pub fn cursor_path(&self) -> Option<PathBuf> {
        self.selected_entry()
            .map(|e| self.listed_dir.join(e.name()))
    }

    // Navigation functions

    /// Prepares a new listing request by incrementing the request ID.
    pub fn prepare_new_request(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }

    /// Moves the cursor by `delta` rows, clamped to the shown entries.
    /// Returns `true` if the cursor moved.
    pub fn move_by(&mut self, delta: isize) -> bool {
        let len = self.shown_len();
        if len == 0 {
            return false;
        }
        let target = self.selected.saturating_add_signed(delta).min(len - 1);
        let moved = target != self.selected;
        self.selected = target;
        moved
    }

    pub fn move_up(&mut self) -> bool {
        self.move_by(-1)
    }

    pub fn move_down(&mut self) -> bool {
        self.move_by(1)
    }

    pub fn move_to_top(&mut self) -> bool {
        let moved = self.selected != 0;
        self.selected = 0;
        moved
    }

    pub fn move_to_bottom(&mut self) -> bool {
        let last = self.shown_len().saturating_sub(1);
        let moved = self.selected != last;
        self.selected = last;
        moved
    }

    /// Sets a new current directory path. The listing is replaced once the worker answers.
    /// Increments the request ID so answers for the previous directory are dropped.
    pub fn set_path(&mut self, path: PathBuf) {
        self.current_dir = path;
        self.request_id = self.request_id.wrapping_add(1);
    }

    /// The directory `..` leads to. The browsing root has no parent.
    pub fn parent_dir(&self) -> Option<PathBuf> {
        if self.listed_dir == self.root {
            return None;
        }
        self.listed_dir.parent().map(Path::to_path_buf)
    }

    /// Where to go after listing `failed` did not work.
    ///
    /// That is the directory of the listing still on screen if it exists, otherwise the
    /// nearest existing ancestor of `failed` inside the root. `None` when there is nowhere
    /// left to go, i.e. the root itself cannot be listed.
    pub fn fallback_dir(&self, failed: &Path) -> Option<PathBuf> {
        if self.listed_dir != failed && self.listed_dir.is_dir() {
            return Some(self.listed_dir.clone());
        }
        failed
            .ancestors()
            .skip(1)
            .take_while(|p| p.starts_with(&self.root))
            .find(|p| p.is_dir())
            .map(Path::to_path_buf)
    }

    /// Replaces the listing with a worker result and puts the cursor on `focus` if it is
    /// shown, otherwise on the first entry. Any filter is dropped.
    pub fn update_from_worker(
        &mut self,
        path: PathBuf,
        entries: Vec<Entry>,
        focus: Option<OsString>,
    ) {
        self.listed_dir = path.clone();
        self.current_dir = path;
        self.filtered = entries.clone();
        self.all_entries = entries;

        self.selected = focus
            .and_then(|f| self.shown_entries().position(|e| e.name() == f.as_os_str()))
            .unwrap_or(0);
        self.clamp_selection();
    }

    /// Replaces the displayed set with the fuzzy matches for `query`.
    pub fn apply_filter(&mut self, query: &str) {
        self.filtered = fuzzy::filter(&self.all_entries, query);
        self.clamp_selection();
    }

    /// Shows the full listing again.
    pub fn clear_filter(&mut self) {
        self.filtered = self.all_entries.clone();
        self.clamp_selection();
    }

    pub fn toggle_dirs(&mut self) {
        self.show_dirs = !self.show_dirs;
        self.clamp_selection();
    }

    /// Records `path` as the handled selection. Returns `false` if it was already recorded.
    pub fn record_selection(&mut self, path: Option<PathBuf>) -> bool {
        if self.selected_path == path {
            return false;
        }
        self.selected_path = path;
        true
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.shown_len().saturating_sub(1));
    }
}
