//! The general configuration settings for parsec.
//!
//! The [General] struct holds the `[general]` table of parsec.toml: initial directory
//! visibility, cursor and scroll steps, and the limits handed to the summarizer.

use crate::core::summarize::SummaryOptions;

use serde::Deserialize;

use std::time::Duration;

/// Lowest probe timeout accepted from the config file.
const MIN_PROBE_TIMEOUT_MS: u64 = 100;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    show_dirs: bool,
    page_step: usize,
    summary_scroll_step: usize,
    probe_timeout_ms: u64,
    max_text_lines: usize,
    max_help_lines: usize,
    max_dir_preview: usize,
    markdown_width: usize,
    icons: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_dirs: true,
            page_step: 10,
            summary_scroll_step: 5,
            probe_timeout_ms: 3000,
            max_text_lines: 50,
            max_help_lines: 25,
            max_dir_preview: 20,
            markdown_width: 80,
            icons: true,
        }
    }
}

impl General {
    #[inline]
    pub fn show_dirs(&self) -> bool {
        self.show_dirs
    }

    #[inline]
    pub fn page_step(&self) -> usize {
        self.page_step.max(1)
    }

    #[inline]
    pub fn summary_scroll_step(&self) -> usize {
        self.summary_scroll_step.max(1)
    }

    #[inline]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms.max(MIN_PROBE_TIMEOUT_MS))
    }

    #[inline]
    pub fn max_dir_preview(&self) -> usize {
        self.max_dir_preview
    }

    #[inline]
    pub fn icons(&self) -> bool {
        self.icons
    }

    /// Builds the summarizer options from these settings.
    ///
    /// The INI and ENV preview lengths are fixed and not configurable.
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            max_text_lines: self.max_text_lines.max(1),
            max_help_lines: self.max_help_lines.max(1),
            probe_timeout: self.probe_timeout(),
            markdown_width: self.markdown_width.max(20),
            ..SummaryOptions::default()
        }
    }
}
