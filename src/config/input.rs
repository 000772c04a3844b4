//! Key binding configuration for parsec.
//!
//! Defines the `[keys]` table of parsec.toml. Every action takes a list of key strings
//! which are parsed by the keymap in app/keymap.rs.

use serde::Deserialize;

/// Key strings for every bindable action.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    up: Vec<String>,
    down: Vec<String>,
    top: Vec<String>,
    bottom: Vec<String>,
    page_up: Vec<String>,
    page_down: Vec<String>,
    open: Vec<String>,
    scroll_up: Vec<String>,
    scroll_down: Vec<String>,
    search: Vec<String>,
    refresh: Vec<String>,
    toggle_dirs: Vec<String>,
    quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    up,
    down,
    top,
    bottom,
    page_up,
    page_down,
    open,
    scroll_up,
    scroll_down,
    search,
    refresh,
    toggle_dirs,
    quit,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            up: vec!["k".into(), "Up".into()],
            down: vec!["j".into(), "Down".into()],
            top: vec!["Home".into(), "g".into()],
            bottom: vec!["End".into(), "G".into()],
            page_up: vec!["Ctrl+u".into()],
            page_down: vec!["Ctrl+d".into()],

            open: vec!["Enter".into()],

            scroll_up: vec!["PageUp".into()],
            scroll_down: vec!["PageDown".into()],

            search: vec!["/".into()],
            refresh: vec!["r".into()],
            toggle_dirs: vec!["t".into()],

            quit: vec!["q".into(), "Ctrl+c".into()],
        }
    }
}
