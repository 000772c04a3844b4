//! Help text for executable files.
//!
//! Probes the target with the usual help flags, one at a time and each under a timeout.
//! The first probe that exits cleanly with some output wins. Timeouts and failures only
//! move on to the next flag; when nothing works a short synthesized description is returned.

use crate::core::formatter::human_size;
use crate::core::proc::run_with_timeout;
use crate::utils::cli::USAGE;

use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// Flags tried in order.
pub const HELP_FLAGS: [&str; 4] = ["--help", "-h", "help", "/?"];

/// Names under which this program may be installed.
const SELF_NAMES: [&str; 2] = ["parsec", "parsec.exe"];

const TRUNCATED: &str = "... (truncated)";

/// Returns true when `path` is this program, by name or by resolved location.
fn is_self(path: &Path) -> bool {
    let by_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| SELF_NAMES.contains(&n));
    if by_name {
        return true;
    }
    match (std::env::current_exe(), path.canonicalize()) {
        (Ok(me), Ok(target)) => me.canonicalize().map(|me| me == target).unwrap_or(false),
        _ => false,
    }
}

pub(crate) fn help_text(
    path: &Path,
    size: u64,
    timeout: Duration,
    max_lines: usize,
    superseded: &dyn Fn() -> bool,
) -> String {
    if is_self(path) {
        return USAGE.to_string();
    }

    for flag in HELP_FLAGS {
        if superseded() {
            log::debug!("probing {} abandoned before {}", path.display(), flag);
            return fallback_text(path, size);
        }
        let mut cmd = Command::new(path);
        cmd.arg(flag);
        match run_with_timeout(cmd, timeout) {
            Ok(out) if out.success() && !out.combined().is_empty() => {
                log::debug!("{} answered {}", path.display(), flag);
                return truncate_lines(&String::from_utf8_lossy(out.combined()), max_lines);
            }
            Ok(_) => log::debug!("{} gave nothing useful for {}", path.display(), flag),
            Err(e) => log::debug!("probe {} {} failed: {}", path.display(), flag, e),
        }
    }

    fallback_text(path, size)
}

fn truncate_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= max_lines {
        return text.to_string();
    }
    let mut kept = lines[..max_lines].join("\n");
    kept.push('\n');
    kept.push_str(TRUNCATED);
    kept
}

fn fallback_text(path: &Path, size: u64) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "Executable: {}\n\nThis is an executable file.\nHelp flags ({}) did not produce output.\n\nFile size: {}\nType: Binary executable",
        name,
        HELP_FLAGS.join(", "),
        human_size(size)
    )
}
