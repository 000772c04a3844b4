//! Core runtime logic for parsec.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing and the [Entry] struct.
//! - [classify]: file kind and language label by extension and permissions.
//! - [summarize]: per-kind summary extraction.
//! - [markdown]: markdown to ANSI-styled text.
//! - [fuzzy]: fuzzy filtering for search mode.
//! - [proc]: running external programs under a timeout.
//! - [formatter]: sizes, paths, directory previews and summary pane text.
//! - [worker]: background threads and message passing back into the app state.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//! - [error]: error types.

pub mod classify;
pub mod error;
pub mod fm;
pub mod formatter;
pub mod fuzzy;
pub mod markdown;
pub mod proc;
pub mod summarize;
pub mod terminal;
pub mod worker;

pub use fm::{Entry, list_directory};
pub use summarize::{Summarizer, Summary, SummaryBody};
