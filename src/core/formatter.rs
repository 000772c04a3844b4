//! Display formatting for parsec.
//!
//! Everything that turns core data into text for the summary pane lives here: human readable
//! sizes, root-relative paths, the directory preview, the fixed parent/unsupported messages
//! and the sectioned rendering of a [Summary].
//!
//! Section titles carry ANSI SGR codes. The summary pane turns them into styled spans with
//! `ansi-to-tui`, the same way it handles rendered markdown.

use crate::core::fm::{Entry, list_directory};
use crate::core::summarize::{Summary, SummaryBody};
use crate::ui::icons::{DIR_ICON, entry_icon};

use humansize::{FormatSizeOptions, WINDOWS, format_size};
use unicode_width::UnicodeWidthChar;

use std::borrow::Cow;
use std::fmt::Write;
use std::path::{Component, Path};

const RESET: &str = "\x1b[0m";
const ENTER_HINT: &str = "Press Enter to navigate into this directory.";
const ELLIPSIS: &str = "...";

/// Section limits of the summary pane.
const MAX_HEADERS: usize = 10;
const MAX_CONFIG_KEYS: usize = 15;
const MAX_FUNCTIONS: usize = 15;
const MAX_IMPORTS: usize = 10;
const MAX_TYPES: usize = 10;
const MAX_STRUCTS: usize = 10;
const MAX_LINKS: usize = 8;

/// Formats a byte count with binary units and one decimal, e.g. `1.5 KB`, `2.0 KB` or `512 B`.
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let opts = FormatSizeOptions::from(WINDOWS)
        .decimal_places(1)
        .decimal_zeroes(1);
    // The WINDOWS preset spells kilo as `kB`
    format_size(bytes, opts).replacen("kB", "KB", 1)
}

/// Shows `path` relative to `root` with a leading slash; `root` itself is `/`.
///
/// Paths outside of `root` are shown as they are.
pub fn display_path(root: &Path, path: &Path) -> String {
    let Ok(rel) = path.strip_prefix(root) else {
        return path.display().to_string();
    };
    let parts: Vec<Cow<'_, str>> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(p) => Some(p.to_string_lossy()),
            _ => None,
        })
        .collect();
    format!("/{}", parts.join("/"))
}

/// Cuts `text` to at most `max` columns, ending in `...` when something was cut.
pub fn truncate_to_width(text: &str, max: usize) -> Cow<'_, str> {
    let full: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if full <= max {
        return Cow::Borrowed(text);
    }
    let budget = max.saturating_sub(ELLIPSIS.len());
    let mut out = String::with_capacity(max);
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

fn styled(title: &str, sgr: &str) -> String {
    format!("\x1b[{}m{}{}", sgr, title, RESET)
}

/// Text shown while `..` is selected.
pub fn parent_message(root: &Path, current_dir: &Path) -> String {
    let parent = current_dir.parent().unwrap_or(current_dir);
    format!(
        "{} Parent Directory\n\nPath: {}\n\nPress Enter to navigate up to this directory.",
        DIR_ICON,
        display_path(root, parent)
    )
}

/// Text shown for files that have no summarization strategy.
pub fn unsupported_message(name: &str) -> String {
    format!(
        "File: {}\n\nThis file type is not supported for summarization.",
        name
    )
}

/// Lists the immediate children of `dir` for the summary pane.
///
/// Shows file and directory counts and the first `max_items` entries. The `..` entry is left
/// out. Read errors are rendered into the text.
pub fn directory_preview(dir: &Path, root: &Path, max_items: usize, icons: bool) -> String {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());

    let entries: Vec<Entry> = match list_directory(dir, root) {
        Ok(entries) => entries.into_iter().filter(|e| !e.is_parent()).collect(),
        Err(e) => {
            log::debug!("directory preview of {} failed: {}", dir.display(), e);
            return format!(
                "{} Directory: {}\n\nError reading directory: {}",
                DIR_ICON, name, e
            );
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} Directory: {}", DIR_ICON, name);
    let _ = writeln!(out, "Path: {}\n", display_path(root, dir));

    if entries.is_empty() {
        let _ = write!(out, "📭 This directory is empty.\n\n{}", ENTER_HINT);
        return out;
    }

    let dirs = entries.iter().filter(|e| e.is_dir()).count();
    let files = entries.len() - dirs;

    let _ = write!(out, "Contains: {} files", files);
    if dirs > 0 {
        let _ = write!(out, ", {} directories", dirs);
    }
    out.push_str("\n\n");

    if entries.len() > max_items {
        let _ = writeln!(out, "First {} items:", max_items);
    } else {
        out.push_str("Contents:\n");
    }

    for entry in entries.iter().take(max_items) {
        let slash = if entry.is_dir() { "/" } else { "" };
        if icons {
            let _ = writeln!(out, "  {} {}{}", entry_icon(entry), entry.name_str(), slash);
        } else {
            let _ = writeln!(out, "  {}{}", entry.name_str(), slash);
        }
    }

    if entries.len() > max_items {
        let _ = writeln!(out, "  ... and {} more items", entries.len() - max_items);
    }

    let _ = write!(out, "\n{}", ENTER_HINT);
    out
}

fn push_list(out: &mut String, title: &str, sgr: &str, items: &[String], max: usize, bullet: bool) {
    if items.is_empty() {
        return;
    }
    out.push_str(&styled(title, sgr));
    out.push('\n');
    for item in items.iter().take(max) {
        if bullet {
            let _ = writeln!(out, "  • {}", item);
        } else {
            let _ = writeln!(out, "  {}", item);
        }
    }
    if items.len() > max {
        let _ = writeln!(out, "  ... and {} more", items.len() - max);
    }
    out.push('\n');
}

fn push_preview(out: &mut String, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    out.push_str(&styled("📖 Content Preview:", "1;38;5;244"));
    out.push_str("\n\n");
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}

/// Renders a summary as the summary pane text.
///
/// A summary carrying an error renders as a single `Error: ...` line.
pub fn summary_text(summary: &Summary) -> String {
    if let Some(err) = summary.error_message() {
        return format!("{}{}", styled("Error: ", "1;38;5;196"), err);
    }

    let mut out = String::new();
    out.push_str(&styled(&format!("📄 {}", summary.path()), "1;4;38;5;86"));
    out.push_str("\n\n");

    let _ = writeln!(out, "Language: {}", summary.language());
    // Executables are never read, so they have no line count
    if !matches!(summary.body(), SummaryBody::Executable(_)) {
        let _ = writeln!(out, "Lines: {}", summary.line_count());
    }
    if summary.size_bytes() > 0 {
        let _ = writeln!(out, "Size: {}", human_size(summary.size_bytes()));
    }
    if summary.function_count() > 0 {
        let _ = writeln!(out, "Functions: {}", summary.function_count());
    }
    out.push('\n');

    match summary.body() {
        SummaryBody::Empty => {}
        SummaryBody::Executable(help) => {
            out.push_str(&styled("⚙️ Executable Help:", "1;38;5;208"));
            out.push_str("\n\n");
            out.push_str(help);
        }
        SummaryBody::Markup(m) => {
            if let Some(rendered) = m.rendered.as_deref().filter(|r| !r.is_empty()) {
                out.push_str(&styled("📝 Rendered Content:", "1;38;5;86"));
                out.push_str("\n\n");
                out.push_str(rendered);
                return out;
            }
            push_preview(&mut out, &m.preview);
            push_list(&mut out, "📋 Headers:", "1;38;5;171", &m.headers, MAX_HEADERS, false);
            push_list(&mut out, "🔗 Links:", "1;38;5;39", &m.links, MAX_LINKS, false);
        }
        SummaryBody::Config(c) => {
            push_preview(&mut out, &c.preview);
            push_list(
                &mut out,
                "🔧 Configuration Keys:",
                "1;38;5;214",
                &c.keys,
                MAX_CONFIG_KEYS,
                true,
            );
        }
        SummaryBody::Text(lines) => push_preview(&mut out, lines),
        SummaryBody::Source(s) => {
            push_list(&mut out, "🔧 Functions:", "1;38;5;33", &s.functions, MAX_FUNCTIONS, true);
            push_list(&mut out, "📦 Imports:", "1;38;5;99", &s.imports, MAX_IMPORTS, true);
            push_list(&mut out, "🏷️  Types:", "1;38;5;207", &s.types, MAX_TYPES, true);
            // Languages without a separate struct notion fill both lists the same way.
            if s.structs.len() != s.types.len() {
                push_list(&mut out, "🏗️  Structs:", "1;38;5;141", &s.structs, MAX_STRUCTS, true);
            }
        }
    }

    out
}
