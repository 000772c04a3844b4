//! main.rs
//! Entry point for parsec

pub(crate) mod app;
pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod ui;
pub(crate) mod utils;

use crate::config::Config;
use crate::core::terminal;
use crate::utils::cli::{CliAction, handle_args};
use crate::utils::{init_logging, resolve_initial_dir};

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[parsec] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let path_arg = match handle_args() {
        CliAction::Exit => return Ok(()),
        CliAction::Fail => std::process::exit(2),
        CliAction::RunApp => None,
        CliAction::RunAppAtPath(path) => Some(path),
    };

    if let Err(e) = init_logging() {
        eprintln!("[parsec] Cannot open log file: {}", e);
    }

    let root = match path_arg {
        Some(arg) => resolve_initial_dir(&arg)?,
        None => std::env::current_dir()?,
    };

    if !root.is_dir() {
        println!("Directory does not exist: {}", root.display());
        std::process::exit(1);
    }

    let config = Config::load();
    log::info!("browsing {}", root.display());

    let mut app = app::AppState::from_dir(&config, &root)?;
    terminal::run_terminal(&mut app)
}
