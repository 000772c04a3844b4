//! Error types for the summarizer and its collaborators.
//!
//! None of these ever escape to the event loop. The summarizer folds them into
//! [crate::core::Summary::error_message] and the controller renders that as a banner.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("cannot stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading file: {0}")]
    Read(#[from] io::Error),

    /// Only JSON is strict enough to fail. Everything else degrades to a text preview.
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Failure of the markdown rendering collaborator.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot render markdown into a zero-width area")]
    ZeroWidth,
}
