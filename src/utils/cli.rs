//! Command-line argument parsing and help for parsec.
//!
//! parsec takes at most one positional argument, the directory to browse. When invoked with
//! no arguments it browses the current directory.

/// Usage text printed by `--help`, also shown as the summary of the parsec binary itself.
pub const USAGE: &str = r#"Usage: parsec [directory]

Navigate and summarize files in a terminal-based interface.

Examples:
  parsec                       # Scan current directory
  parsec /home/user/code       # Scan /home/user/code
  parsec "My Projects"         # Use quotes for paths with spaces

Parsec is a terminal-based file summarizer that provides:
- Split-screen interface with file navigation
- Multi-language source code analysis
- Markdown rendering
- Configuration file parsing
- Directory navigation with live preview

Keyboard Controls:
  ↑/↓ or k/j    Navigate file list
  Enter         Enter directory
  /             Start fuzzy search
  PgUp/PgDn     Scroll summary content
  Home/End      Jump to first/last file
  Ctrl+U/Ctrl+D Move the cursor by a page
  t             Toggle directory visibility
  r             Refresh current directory
  q or Ctrl+C   Quit

Search Mode:
  Type          Add characters to search query
  Backspace     Remove last character
  Enter         Confirm search and stay filtered
  ESC           Cancel search and show all files

Environment:
  PARSEC_CONFIG   Override the default config path
  PARSEC_LOG      Write logs to this file (level from RUST_LOG)
"#;

#[derive(Debug, PartialEq)]
pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
    Fail,
}

/// Parses the process arguments.
pub fn handle_args() -> CliAction {
    parse_args(std::env::args().skip(1))
}

/// Parses arguments without the program name. Help and version are printed here.
pub fn parse_args<I>(args: I) -> CliAction
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    let Some(first) = args.first() else {
        return CliAction::RunApp;
    };

    if args.len() > 1 {
        eprintln!("Error: parsec accepts only one argument at a time.");
        eprintln!("Usage: parsec [directory]");
        return CliAction::Fail;
    }

    match first.as_str() {
        "-h" | "--help" => {
            print!("{}", USAGE);
            CliAction::Exit
        }
        "-V" | "--version" => {
            println!("parsec {}", env!("CARGO_PKG_VERSION"));
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Fail
        }
    }
}
