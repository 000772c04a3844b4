//! State of the summary pane for parsec.
//!
//! Holds the text shown in the summary pane, the loading flag, the scroll position and the
//! request id of the summary or directory preview the pane is waiting for.
//!
//! The scroll position always stays within `[0, max(0, lines - visible)]` where `visible`
//! is the pane height minus four rows for borders and padding.

/// Shown before anything is selected.
pub const INITIAL_TEXT: &str = "Select a file to view its summary";
pub const LOADING_TEXT: &str = "Loading...";
pub const NO_SELECTION_TEXT: &str = "No file selected";

/// Rows of the pane that never show content.
const PANE_CHROME: usize = 4;

pub struct SummaryPane {
    content: String,
    line_count: usize,
    loading: bool,
    scroll: usize,
    height: usize,
    request_id: u64,
}

impl Default for SummaryPane {
    fn default() -> Self {
        Self {
            content: INITIAL_TEXT.to_string(),
            line_count: 1,
            loading: false,
            scroll: 0,
            height: 0,
            request_id: 0,
        }
    }
}

impl SummaryPane {
    // Getters / Accessors

    /// The text to draw. While loading this is [LOADING_TEXT].
    #[inline]
    pub fn content(&self) -> &str {
        if self.loading {
            LOADING_TEXT
        } else {
            &self.content
        }
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[inline]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[inline]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Number of content rows that fit into the pane, at least one.
    pub fn visible_lines(&self) -> usize {
        self.height.saturating_sub(PANE_CHROME).max(1)
    }

    pub fn max_scroll(&self) -> usize {
        let lines = if self.loading { 1 } else { self.line_count };
        lines.saturating_sub(self.visible_lines())
    }

    // Mutators

    /// Starts a new request for this pane and returns its id.
    pub fn prepare_new_request(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }

    /// Replaces the content and scrolls back to the top. Ends loading.
    pub fn set_content(&mut self, content: String) {
        self.line_count = content.split('\n').count();
        self.content = content;
        self.loading = false;
        self.scroll = 0;
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
        self.scroll = 0;
    }

    /// Updates the pane height after a resize or layout change.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Scrolls by `delta` rows, clamped to the content.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }
}
