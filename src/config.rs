//! Configuration for parsec.
//!
//! Settings are read once at startup from `parsec.toml`:
//! - [general]: browsing and summarizer tunables.
//! - [input]: key bindings per action.
//! - [load]: the [Config] struct and config file resolution.

pub mod general;
pub mod input;
pub mod load;

pub use general::General;
pub use input::Keys;
pub use load::Config;
