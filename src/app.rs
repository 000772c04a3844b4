//! Application controller for parsec.
//!
//! - [state]: the [AppState] owning all mutable state and applying worker results.
//! - [nav]: current directory, listing, displayed subset and cursor.
//! - [search]: search mode and its query.
//! - [summary]: text, loading flag and scroll position of the summary pane.
//! - [keymap]: key to action mapping built from the config.
//! - [handlers]: per-action key handlers.

pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod search;
pub mod state;
pub mod summary;

pub use nav::NavState;
pub use search::SearchState;
pub use state::{AppState, KeypressResult};
pub use summary::SummaryPane;
