//! Terminal UI for parsec.
//!
//! - [render]: the per-frame entry point and screen layout.
//! - [panes]: the file list and summary panes.
//! - [icons]: emoji icons for entries.

pub mod icons;
pub mod panes;
pub mod render;

pub use render::render;
