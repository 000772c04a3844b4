//! Worker threads for parsec.
//!
//! Directory listings run on the I/O thread; summaries and directory previews run on the
//! summary thread. Requests [WorkerTask] come in from the AppState via channels, and results
//! [WorkerResponse] go back through a single response channel which the event loop drains
//! once per tick. Workers never touch AppState.
//!
//! Every task carries a request id and every response echoes it back together with the path
//! it was computed for, so the AppState can drop results for selections that have moved on.
//!
//! # Caution:
//! This module is the protocol boundary between the event loop and the background threads.
//! Adding or changing variants requires matching changes in app/state.rs.

use crate::core::fm::{Entry, list_directory};
use crate::core::formatter::directory_preview;
use crate::core::summarize::{Summarizer, Summary};

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

/// Channels to the worker threads.
pub struct Workers {
    io_tx: Sender<WorkerTask>,
    summary_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
}

impl Workers {
    /// Spawns the I/O and summary threads.
    ///
    /// The summary thread only ever works on the most recent task in its queue. Older queued
    /// tasks are superseded, so rapid navigation cannot pile up work.
    pub fn spawn(summarizer: Arc<Summarizer>) -> Self {
        let (io_tx, io_rx) = unbounded::<WorkerTask>();
        let (summary_tx, summary_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();

        start_io_worker(io_rx, res_tx.clone());
        start_summary_worker(summary_rx, res_tx, summarizer);

        Self {
            io_tx,
            summary_tx,
            response_rx,
        }
    }

    #[inline]
    pub fn io_tx(&self) -> &Sender<WorkerTask> {
        &self.io_tx
    }

    #[inline]
    pub fn summary_tx(&self) -> &Sender<WorkerTask> {
        &self.summary_tx
    }

    #[inline]
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }
}

/// Tasks sent to the worker threads.
#[derive(Debug)]
pub enum WorkerTask {
    LoadDirectory {
        path: PathBuf,
        root: PathBuf,
        focus: Option<OsString>,
        request_id: u64,
    },
    Summarize {
        dir: PathBuf,
        name: String,
        request_id: u64,
    },
    PreviewDirectory {
        path: PathBuf,
        root: PathBuf,
        max_items: usize,
        icons: bool,
        request_id: u64,
    },
}

/// Responses sent from the worker threads back to the event loop.
#[derive(Debug)]
pub enum WorkerResponse {
    DirectoryLoaded {
        path: PathBuf,
        entries: Vec<Entry>,
        focus: Option<OsString>,
        request_id: u64,
    },
    DirectoryFailed {
        path: PathBuf,
        error: String,
        request_id: u64,
    },
    SummaryReady {
        path: PathBuf,
        summary: Summary,
        request_id: u64,
    },
    DirectoryPreview {
        path: PathBuf,
        text: String,
        request_id: u64,
    },
}

fn start_io_worker(task_rx: Receiver<WorkerTask>, res_tx: Sender<WorkerResponse>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let (path, root, focus, request_id) = match task {
                WorkerTask::LoadDirectory {
                    path,
                    root,
                    focus,
                    request_id,
                } => (path, root, focus, request_id),
                other => {
                    log::warn!("io worker ignored {:?}", other);
                    continue;
                }
            };

            let response = match list_directory(&path, &root) {
                Ok(entries) => WorkerResponse::DirectoryLoaded {
                    path,
                    entries,
                    focus,
                    request_id,
                },
                Err(e) => {
                    log::warn!("listing {} failed: {}", path.display(), e);
                    WorkerResponse::DirectoryFailed {
                        path,
                        error: e.to_string(),
                        request_id,
                    }
                }
            };
            if res_tx.send(response).is_err() {
                break;
            }
        }
    });
}

fn start_summary_worker(
    task_rx: Receiver<WorkerTask>,
    res_tx: Sender<WorkerResponse>,
    summarizer: Arc<Summarizer>,
) {
    thread::spawn(move || {
        while let Ok(mut task) = task_rx.recv() {
            // Coalesce to the latest queued task
            while let Ok(next) = task_rx.try_recv() {
                log::debug!("superseded {:?}", task);
                task = next;
            }

            let response = match task {
                WorkerTask::Summarize {
                    dir,
                    name,
                    request_id,
                } => {
                    let superseded = || !task_rx.is_empty();
                    let summary = summarizer.summarize_until(&dir, &name, &superseded);
                    WorkerResponse::SummaryReady {
                        path: dir.join(&name),
                        summary,
                        request_id,
                    }
                }
                WorkerTask::PreviewDirectory {
                    path,
                    root,
                    max_items,
                    icons,
                    request_id,
                } => {
                    let text = directory_preview(&path, &root, max_items, icons);
                    WorkerResponse::DirectoryPreview {
                        path,
                        text,
                        request_id,
                    }
                }
                other => {
                    log::warn!("summary worker ignored {:?}", other);
                    continue;
                }
            };
            if res_tx.send(response).is_err() {
                break;
            }
        }
    });
}

/// Worker threads integration tests.
#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, rng};
    use std::fs::{self, File};
    use std::time::Duration;
    use tempfile::tempdir;

    fn workers() -> Workers {
        Workers::spawn(Arc::new(Summarizer::default()))
    }

    #[test]
    fn loads_a_directory_with_focus_echoed() -> Result<(), Box<dyn std::error::Error>> {
        let root = tempdir()?;
        let dir = root.path().join("pkg");
        fs::create_dir(&dir)?;
        File::create(dir.join("a.go"))?;

        let workers = workers();
        workers.io_tx().send(WorkerTask::LoadDirectory {
            path: dir.clone(),
            root: root.path().to_path_buf(),
            focus: Some(OsString::from("a.go")),
            request_id: 7,
        })?;

        match workers.response_rx().recv_timeout(Duration::from_secs(2))? {
            WorkerResponse::DirectoryLoaded {
                path,
                entries,
                focus,
                request_id,
            } => {
                assert_eq!(path, dir);
                assert_eq!(request_id, 7);
                assert_eq!(focus, Some(OsString::from("a.go")));
                assert_eq!(entries.len(), 2);
                assert!(entries[0].is_parent());
            }
            other => return Err(format!("Unexpected response: {:?}", other).into()),
        }
        Ok(())
    }

    #[test]
    fn missing_directory_reports_failure() -> Result<(), Box<dyn std::error::Error>> {
        let root = tempdir()?;
        let workers = workers();
        workers.io_tx().send(WorkerTask::LoadDirectory {
            path: root.path().join("gone"),
            root: root.path().to_path_buf(),
            focus: None,
            request_id: 1,
        })?;

        match workers.response_rx().recv_timeout(Duration::from_secs(2))? {
            WorkerResponse::DirectoryFailed { request_id, .. } => assert_eq!(request_id, 1),
            other => return Err(format!("Unexpected response: {:?}", other).into()),
        }
        Ok(())
    }

    #[test]
    fn summary_is_tagged_with_its_path() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("main.go"), "package main\n\nfunc Foo() {}\n")?;

        let workers = workers();
        workers.summary_tx().send(WorkerTask::Summarize {
            dir: dir.path().to_path_buf(),
            name: "main.go".to_string(),
            request_id: 3,
        })?;

        match workers.response_rx().recv_timeout(Duration::from_secs(2))? {
            WorkerResponse::SummaryReady {
                path,
                summary,
                request_id,
            } => {
                assert_eq!(path, dir.path().join("main.go"));
                assert_eq!(request_id, 3);
                assert_eq!(summary.function_count(), 1);
            }
            other => return Err(format!("Unexpected response: {:?}", other).into()),
        }
        Ok(())
    }

    #[test]
    fn directory_preview_runs_on_summary_thread() -> Result<(), Box<dyn std::error::Error>> {
        let root = tempdir()?;
        let sub = root.path().join("docs");
        fs::create_dir(&sub)?;
        File::create(sub.join("guide.md"))?;

        let workers = workers();
        workers.summary_tx().send(WorkerTask::PreviewDirectory {
            path: sub.clone(),
            root: root.path().to_path_buf(),
            max_items: 20,
            icons: true,
            request_id: 9,
        })?;

        match workers.response_rx().recv_timeout(Duration::from_secs(2))? {
            WorkerResponse::DirectoryPreview { path, text, .. } => {
                assert_eq!(path, sub);
                assert!(text.contains("📝 guide.md"));
            }
            other => return Err(format!("Unexpected response: {:?}", other).into()),
        }
        Ok(())
    }

    #[test]
    fn burst_of_summaries_ends_with_the_latest() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let names: Vec<String> = (0..20).map(|i| format!("f{}.txt", i)).collect();
        for name in &names {
            fs::write(dir.path().join(name), "x\n")?;
        }

        let workers = workers();
        let mut rng = rng();
        let mut last = 0;
        for id in 1..=60u64 {
            let name = &names[rng.random_range(0..names.len())];
            workers.summary_tx().send(WorkerTask::Summarize {
                dir: dir.path().to_path_buf(),
                name: name.clone(),
                request_id: id,
            })?;
            last = id;
        }

        let mut seen = Vec::new();
        while let Ok(resp) = workers.response_rx().recv_timeout(Duration::from_millis(500)) {
            match resp {
                WorkerResponse::SummaryReady { request_id, .. } => seen.push(request_id),
                other => return Err(format!("Unexpected response: {:?}", other).into()),
            }
        }

        assert!(!seen.is_empty() && seen.len() <= 60);
        assert_eq!(seen.last(), Some(&last));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    }
}
