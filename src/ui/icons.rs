//! Emoji icons for file list rows and directory previews.
//!
//! [entry_icon] picks an icon for an [Entry]: the parent entry and directories get fixed
//! icons, a few well-known file names have their own, everything else goes by extension.

use crate::core::fm::Entry;

use phf::phf_map;

pub const PARENT_ICON: &str = "⬆️";
pub const DIR_ICON: &str = "📁";
pub const FILE_ICON: &str = "📄";
pub const EXEC_ICON: &str = "⚙️";

/// Extension (with dot) to icon.
static EXT_ICON_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    // Source
    ".go" => "🐹",
    ".py" => "🐍",
    ".js" => "📄",
    ".ts" => "📘",
    ".jsx" => "⚛️",
    ".tsx" => "⚛️",
    ".rs" => "🦀",
    ".java" => "☕",
    ".c" => "📄",
    ".cpp" => "📄",
    ".cc" => "📄",
    ".h" => "📄",
    ".hpp" => "📄",
    ".cs" => "🔷",
    ".php" => "🐘",
    ".rb" => "💎",
    ".swift" => "🍎",
    ".kt" => "📱",
    ".scala" => "⚖️",

    // Docs
    ".md" => "📝",
    ".markdown" => "📝",
    ".txt" => "📄",
    ".rst" => "📜",
    ".tex" => "📰",

    // Config
    ".json" => "🔧",
    ".yaml" => "⚙️",
    ".yml" => "⚙️",
    ".toml" => "⚙️",
    ".ini" => "⚙️",
    ".cfg" => "⚙️",
    ".conf" => "⚙️",
    ".env" => "🌿",
    ".properties" => "⚙️",

    // Data
    ".xml" => "📋",
    ".csv" => "📊",
    ".log" => "📜",
    ".sql" => "🗄️",

    // Scripts
    ".sh" => "🐚",
    ".bash" => "🐚",
    ".zsh" => "🐚",
    ".fish" => "🐠",
    ".ps1" => "💻",
    ".bat" => "💻",
    ".cmd" => "💻",

    // Web
    ".html" => "🌐",
    ".htm" => "🌐",
    ".css" => "🎨",
    ".scss" => "🎨",
    ".sass" => "🎨",
    ".less" => "🎨",

    // Images
    ".png" => "🖼️",
    ".jpg" => "🖼️",
    ".jpeg" => "🖼️",
    ".gif" => "🖼️",
    ".svg" => "🖼️",
    ".ico" => "🖼️",

    // Archives and packages
    ".zip" => "📦",
    ".tar" => "📦",
    ".gz" => "📦",
    ".rar" => "📦",
    ".7z" => "📦",
    ".deb" => "📦",
    ".rpm" => "📦",
    ".msi" => "📦",
    ".gradle" => "🐘",

    ".exe" => "⚙️",
    ".bin" => "⚙️",
};

/// Files recognised by their full name rather than their extension.
static SPECIAL_FILE_ICON_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "Makefile" => "🔨",
    "makefile" => "🔨",
    "Dockerfile" => "🐳",
    "LICENSE" => "📜",
};

/// Icon for a bare extension, falling back to the generic file icon.
pub fn extension_icon(ext: &str) -> &'static str {
    EXT_ICON_MAP.get(ext).copied().unwrap_or(FILE_ICON)
}

pub fn entry_icon(entry: &Entry) -> &'static str {
    if entry.is_parent() {
        return PARENT_ICON;
    }
    if entry.is_dir() {
        return DIR_ICON;
    }
    if let Some(icon) = SPECIAL_FILE_ICON_MAP.get(entry.name_str().as_ref()) {
        return icon;
    }
    if entry.extension().is_empty() && entry.is_executable() {
        return EXEC_ICON;
    }
    extension_icon(entry.extension())
}
