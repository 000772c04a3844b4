//! Key mapping and action dispatch for parsec.
//!
//! Maps keys from the config to actions. Keys are only looked up while browsing; search mode
//! reads raw key events in app/handlers.rs.

use crate::config::Config;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use std::collections::HashMap;

/// Represents any action in the app: file list navigation, summary scrolling, or system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    Nav(NavAction),
    Summary(SummaryAction),
    System(SystemAction),
}

/// Cursor movement and directory changes in the file list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NavAction {
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
    Open,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SummaryAction {
    ScrollUp,
    ScrollDown,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SystemAction {
    Quit,
    Search,
    Refresh,
    ToggleDirs,
}

/// Key + modifiers as used in the keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built from the config
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub fn from_config(config: &Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use SummaryAction as P;
        use SystemAction as S;

        // NavActions
        bind!(keys.up(),            Action::Nav(N::Up));
        bind!(keys.down(),          Action::Nav(N::Down));
        bind!(keys.top(),           Action::Nav(N::Top));
        bind!(keys.bottom(),        Action::Nav(N::Bottom));
        bind!(keys.page_up(),       Action::Nav(N::PageUp));
        bind!(keys.page_down(),     Action::Nav(N::PageDown));
        bind!(keys.open(),          Action::Nav(N::Open));

        // SummaryActions
        bind!(keys.scroll_up(),     Action::Summary(P::ScrollUp));
        bind!(keys.scroll_down(),   Action::Summary(P::ScrollDown));

        // SystemActions
        bind!(keys.search(),        Action::System(S::Search));
        bind!(keys.refresh(),       Action::System(S::Refresh));
        bind!(keys.toggle_dirs(),   Action::System(S::ToggleDirs));
        bind!(keys.quit(),          Action::System(S::Quit));

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        // Terminals report 'G' as shift+'G'
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

/// Parses a key string such as `j`, `Up`, `Ctrl+d`, `<c-d>` or `PageDown`.
fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    // A lone '+' or '-' would otherwise be eaten by the separator handling
    if s == "+" || s == "-" {
        let c = s.chars().next()?;
        return Some(Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),
            "pageup" | "pgup" => code = Some(KeyCode::PageUp),
            "pagedown" | "pgdown" | "pgdn" => code = Some(KeyCode::PageDown),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => log::warn!("ignoring unknown key binding {:?}", k),
        }
    }
}
