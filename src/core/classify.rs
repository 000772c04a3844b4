//! File classification for parsec.
//!
//! Maps a file name to a display language label and a logical [Kind], which decides the
//! summarization strategy. Classification by name is pure and total: unknown extensions
//! come back as [Kind::TextData] with the label "Unknown".
//!
//! Executable detection needs the file's metadata on unix-like systems, so
//! [classify_file] layers it on top of [classify]. Executable wins over the extension.

use crate::core::fm::extension_of;

use phf::phf_map;

use std::fs::Metadata;
use std::path::Path;

/// Logical file category driving which summarization strategy runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Source,
    Markup,
    ConfigJson,
    /// YAML, TOML, INI, ENV and properties files.
    ConfigStruct,
    TextData,
    Executable,
}

/// Result of classifying a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    label: &'static str,
    kind: Kind,
    supported: bool,
}

impl Classification {
    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Whether a summary is worth requesting. Unknown extensions still classify,
    /// but the controller shows an "unsupported" message for them instead.
    #[inline]
    pub fn is_supported(&self) -> bool {
        self.supported
    }
}

pub const UNKNOWN_LABEL: &str = "Unknown";
pub const EXECUTABLE_LABEL: &str = "Executable";

/// Extension (with dot) to label and kind.
static EXTENSIONS: phf::Map<&'static str, (&'static str, Kind)> = phf_map! {
    // Source
    ".go" => ("Go", Kind::Source),
    ".py" => ("Python", Kind::Source),
    ".js" => ("JavaScript", Kind::Source),
    ".ts" => ("TypeScript", Kind::Source),
    ".jsx" => ("React/JSX", Kind::Source),
    ".tsx" => ("React/TSX", Kind::Source),
    ".rs" => ("Rust", Kind::Source),
    ".java" => ("Java", Kind::Source),
    ".c" => ("C", Kind::Source),
    ".cpp" => ("C++", Kind::Source),
    ".cc" => ("C++", Kind::Source),
    ".h" => ("C Header", Kind::Source),
    ".hpp" => ("C++ Header", Kind::Source),
    ".cs" => ("C#", Kind::Source),
    ".php" => ("PHP", Kind::Source),
    ".rb" => ("Ruby", Kind::Source),
    ".swift" => ("Swift", Kind::Source),
    ".kt" => ("Kotlin", Kind::Source),
    ".scala" => ("Scala", Kind::Source),

    // Documentation
    ".md" => ("Markdown", Kind::Markup),
    ".markdown" => ("Markdown", Kind::Markup),
    ".txt" => ("Text", Kind::TextData),
    ".rst" => ("reStructuredText", Kind::TextData),

    // Configuration
    ".json" => ("JSON", Kind::ConfigJson),
    ".yaml" => ("YAML", Kind::ConfigStruct),
    ".yml" => ("YAML", Kind::ConfigStruct),
    ".toml" => ("TOML", Kind::ConfigStruct),
    ".ini" => ("INI", Kind::ConfigStruct),
    ".cfg" => ("Config", Kind::ConfigStruct),
    ".conf" => ("Config", Kind::ConfigStruct),
    ".env" => ("Environment", Kind::ConfigStruct),
    ".properties" => ("Properties", Kind::ConfigStruct),

    // Data
    ".xml" => ("XML", Kind::TextData),
    ".csv" => ("CSV", Kind::TextData),
    ".log" => ("Log", Kind::TextData),

    // Scripts
    ".sh" => ("Shell", Kind::TextData),
    ".bash" => ("Bash", Kind::TextData),
    ".zsh" => ("Zsh", Kind::TextData),
    ".fish" => ("Fish", Kind::TextData),
    ".ps1" => ("PowerShell", Kind::TextData),
    ".bat" => ("Batch", Kind::TextData),
    ".cmd" => ("Command", Kind::TextData),
};

/// Classifies a file by its name alone.
pub fn classify(name: &str) -> Classification {
    classify_ext(&extension_of(name))
}

/// Classifies a lower-cased extension (with dot).
pub fn classify_ext(ext: &str) -> Classification {
    match EXTENSIONS.get(ext) {
        Some(&(label, kind)) => Classification {
            label,
            kind,
            supported: true,
        },
        None => Classification {
            label: UNKNOWN_LABEL,
            kind: Kind::TextData,
            supported: false,
        },
    }
}

/// Classifies a file on disk. An executable file is always [Kind::Executable],
/// whatever its extension says.
pub fn classify_file(path: &Path, meta: &Metadata) -> Classification {
    if is_executable(path, meta) {
        return Classification {
            label: EXECUTABLE_LABEL,
            kind: Kind::Executable,
            supported: true,
        };
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    classify(&name)
}

/// Extensions that windows treats as directly runnable.
pub fn is_windows_executable_ext(ext: &str) -> bool {
    matches!(ext, ".exe" | ".com" | ".bat" | ".cmd" | ".ps1" | ".msi")
}

/// Permission bits on unix-like systems, extension on windows.
pub fn is_executable(path: &Path, meta: &Metadata) -> bool {
    if !meta.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = path;
        meta.permissions().mode() & 0o111 != 0
    }

    #[cfg(windows)]
    {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        is_windows_executable_ext(&extension_of(&name))
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = path;
        false
    }
}
