//! Miscellaneous utility functions for parsec.
//!
//! - [cli]: argument parsing and the usage text.
//! - [helpers]: path resolution and logging setup.

pub mod cli;
pub mod helpers;

pub use helpers::{get_home, init_logging, resolve_initial_dir};
