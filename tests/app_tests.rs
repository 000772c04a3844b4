//! AppState tests for parsec
//!
//! These tests drive [AppState] the way the event loop does: keypresses in, ticks to drain the
//! workers, then checks on what the file list and summary pane would show.

use parsec_tui::app::{AppState, KeypressResult};
use parsec_tui::config::Config;
use parsec_tui::core::summarize::Summarizer;
use parsec_tui::core::worker::WorkerResponse;
use parsec_tui::ui::panes::footer_text;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{Rng, rng};
use std::fs;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn press(app: &mut AppState, code: KeyCode) -> KeypressResult {
    app.handle_keypress(KeyEvent::new(code, KeyModifiers::NONE))
}

fn tick_until(app: &mut AppState, done: impl Fn(&AppState) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(3);
    while Instant::now() < deadline {
        app.tick();
        if done(app) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

fn cursor_name(app: &AppState) -> Option<String> {
    app.nav().selected_entry().map(|e| e.name_str().into_owned())
}

fn shows_cursor_summary(app: &AppState) -> bool {
    !app.summary().is_loading()
        && cursor_name(app).is_some_and(|name| app.summary().content().contains(&name))
}

#[test]
fn test_rapid_navigation_settles_on_the_cursor_entry() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    for i in 0..12 {
        fs::write(
            temp.path().join(format!("mod{:02}.go", i)),
            format!("package m\n\nfunc F{}() {{}}\n", i),
        )?;
    }

    let mut app = AppState::from_dir(&config, temp.path())?;
    assert!(tick_until(&mut app, |a| !a.is_loading()));

    let keys = [KeyCode::Up, KeyCode::Down, KeyCode::Down, KeyCode::Home, KeyCode::End];
    let mut rng = rng();
    for _ in 0..40 {
        press(&mut app, keys[rng.random_range(0..keys.len())]);
    }

    assert!(tick_until(&mut app, shows_cursor_summary));
    Ok(())
}

#[test]
fn test_stale_summaries_are_dropped() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    for name in ["a.go", "b.go", "c.go"] {
        fs::write(temp.path().join(name), "package x\n\nfunc Foo() {}\n")?;
    }

    let mut app = AppState::from_dir(&config, temp.path())?;
    assert!(tick_until(&mut app, |a| !a.is_loading()));

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(cursor_name(&app).as_deref(), Some("c.go"));
    assert!(tick_until(&mut app, shows_cursor_summary));
    let settled = app.summary().content().to_string();

    // A result for an entry the cursor already left
    let summarizer = Summarizer::default();
    let current = app.summary().request_id();
    let stale_path = WorkerResponse::SummaryReady {
        path: temp.path().join("a.go"),
        summary: summarizer.summarize(temp.path(), "a.go"),
        request_id: current,
    };
    assert!(!app.apply_response(stale_path));

    // A result for the right entry but from an earlier request
    let stale_id = WorkerResponse::SummaryReady {
        path: temp.path().join("c.go"),
        summary: summarizer.summarize(temp.path(), "b.go"),
        request_id: current.wrapping_sub(1),
    };
    assert!(!app.apply_response(stale_id));
    assert_eq!(app.summary().content(), settled);
    Ok(())
}

#[test]
fn test_stale_listing_is_dropped() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    fs::write(temp.path().join("keep.txt"), "x\n")?;

    let mut app = AppState::from_dir(&config, temp.path())?;
    assert!(tick_until(&mut app, |a| !a.is_loading()));

    let old = WorkerResponse::DirectoryLoaded {
        path: temp.path().to_path_buf(),
        entries: Vec::new(),
        focus: None,
        request_id: app.nav().request_id().wrapping_sub(1),
    };
    assert!(!app.apply_response(old));
    assert_eq!(app.nav().all_entries().len(), 1);
    Ok(())
}

#[test]
fn test_hidden_dirs_leave_only_files() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    fs::write(temp.path().join("one.txt"), "1\n")?;
    fs::write(temp.path().join("two.txt"), "2\n")?;
    fs::create_dir(temp.path().join("sub"))?;

    let mut app = AppState::from_dir(&config, temp.path())?;
    assert!(tick_until(&mut app, |a| !a.is_loading()));
    assert_eq!(app.nav().shown_len(), 3);

    press(&mut app, KeyCode::Char('t'));
    assert_eq!(app.nav().shown_len(), 2);
    assert!(app.nav().shown_entries().all(|e| !e.is_dir()));

    let footer = footer_text(app.nav().shown_len(), app.nav().show_dirs());
    assert!(footer.starts_with("2 files"));
    assert!(footer.contains("hidden"));
    Ok(())
}

#[test]
fn test_search_filter_is_a_subset_of_the_listing() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    for name in ["alpha.rs", "beta.rs", "gamma.md", "delta.json"] {
        fs::write(temp.path().join(name), "x\n")?;
    }

    let mut app = AppState::from_dir(&config, temp.path())?;
    assert!(tick_until(&mut app, |a| !a.is_loading()));

    press(&mut app, KeyCode::Char('/'));
    for c in "rs".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    let shown: Vec<String> = app
        .nav()
        .shown_entries()
        .map(|e| e.name_str().into_owned())
        .collect();
    assert!(shown.contains(&"alpha.rs".to_string()));
    assert!(shown.contains(&"beta.rs".to_string()));
    for name in &shown {
        assert!(temp.path().join(name).exists());
    }

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.nav().shown_len(), 4);
    Ok(())
}

#[test]
fn test_entering_and_leaving_a_directory() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    fs::write(temp.path().join("a.txt"), "x\n")?;
    fs::create_dir(temp.path().join("pkg"))?;
    fs::write(temp.path().join("pkg").join("inner.go"), "package pkg\n")?;

    let mut app = AppState::from_dir(&config, temp.path())?;
    assert!(tick_until(&mut app, |a| !a.is_loading()));

    press(&mut app, KeyCode::Down);
    assert_eq!(cursor_name(&app).as_deref(), Some("pkg"));
    press(&mut app, KeyCode::Enter);
    assert!(tick_until(&mut app, |a| !a.is_loading()));
    assert_eq!(app.nav().current_dir(), temp.path().join("pkg"));
    assert_eq!(cursor_name(&app).as_deref(), Some(".."));

    press(&mut app, KeyCode::Enter);
    assert!(tick_until(&mut app, |a| !a.is_loading()));
    assert_eq!(app.nav().current_dir(), temp.path());
    assert_eq!(cursor_name(&app).as_deref(), Some("pkg"));
    Ok(())
}

#[test]
fn test_unreadable_directory_returns_to_the_listing() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    fs::create_dir(temp.path().join("gone"))?;
    fs::write(temp.path().join("keep.txt"), "x\n")?;

    let mut app = AppState::from_dir(&config, temp.path())?;
    assert!(tick_until(&mut app, |a| !a.is_loading()));
    assert_eq!(cursor_name(&app).as_deref(), Some("gone"));

    fs::remove_dir(temp.path().join("gone"))?;
    press(&mut app, KeyCode::Enter);
    assert!(tick_until(&mut app, |a| !a.is_loading()));

    assert_eq!(app.nav().current_dir(), temp.path());
    assert_eq!(app.nav().shown_len(), 1);
    assert_eq!(cursor_name(&app).as_deref(), Some("keep.txt"));
    Ok(())
}

#[test]
fn test_refreshing_a_deleted_directory_goes_up() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    let sub = temp.path().join("sub");
    fs::create_dir(&sub)?;
    fs::write(sub.join("inner.txt"), "x\n")?;

    let mut app = AppState::from_dir(&config, temp.path())?;
    assert!(tick_until(&mut app, |a| !a.is_loading()));
    press(&mut app, KeyCode::Enter);
    assert!(tick_until(&mut app, |a| !a.is_loading()));
    assert_eq!(app.nav().current_dir(), sub);

    fs::remove_dir_all(&sub)?;
    press(&mut app, KeyCode::Char('r'));
    assert!(tick_until(&mut app, |a| !a.is_loading()));

    assert_eq!(app.nav().current_dir(), temp.path());
    assert_eq!(app.nav().shown_len(), 0);
    assert_eq!(app.summary().content(), "No file selected");
    Ok(())
}
