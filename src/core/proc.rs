//! Running external programs for parsec.
//!
//! [run_with_timeout] is the only way parsec executes anything: the help probe in
//! core/summarize/exec.rs uses it to ask executables for their `--help` text.
//!
//! The child gets a null stdin and piped stdout/stderr. Both pipes are drained on their own
//! threads so a chatty child can never block on a full pipe. Chunks come back through
//! crossbeam channels as they are read. If the child outlives the timeout it is killed.
//!
//! A child that exits while something it started still holds its pipes open keeps
//! delivering output until the pipes close or the deadline passes, whichever comes first.

use crate::core::error::SummaryError;

use crossbeam_channel::{Receiver, unbounded};

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound on bytes kept per stream. Anything past this is read and dropped.
const CAPTURE_LIMIT: u64 = 64 * 1024;

/// How often the child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Read size of the pipe drain threads.
const CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug)]
pub struct CommandOutput {
    status: ExitStatus,
    combined: Vec<u8>,
}

impl CommandOutput {
    #[inline]
    pub fn success(&self) -> bool {
        self.status.success()
    }

    #[inline]
    pub fn status(&self) -> ExitStatus {
        self.status
    }

    /// Stdout followed by stderr.
    #[inline]
    pub fn combined(&self) -> &[u8] {
        &self.combined
    }
}

/// Runs `cmd` to completion, or kills it once `timeout` has passed.
///
/// # Errors
/// [SummaryError::Read] when the program cannot be started or polled,
/// [SummaryError::Timeout] when it ran too long.
pub fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<CommandOutput, SummaryError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let deadline = Instant::now() + timeout;
    let mut child = cmd.spawn()?;
    let stdout_rx = drain(child.stdout.take());
    let stderr_rx = drain(child.stderr.take());

    let status = wait_or_kill(&mut child, deadline, timeout)?;

    let mut combined = collect(&stdout_rx, deadline);
    combined.extend(collect(&stderr_rx, deadline));

    Ok(CommandOutput { status, combined })
}

fn wait_or_kill(
    child: &mut Child,
    deadline: Instant,
    timeout: Duration,
) -> Result<ExitStatus, SummaryError> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SummaryError::Timeout(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Reads a pipe on a background thread and sends its first [CAPTURE_LIMIT] bytes in chunks.
/// The channel disconnects once the pipe is closed.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        let Some(pipe) = pipe else {
            return;
        };
        let mut limited = pipe.take(CAPTURE_LIMIT);
        let mut chunk = vec![0u8; CHUNK_SIZE];
        loop {
            match limited.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(chunk[..n].to_vec()).is_err() {
                        return;
                    }
                }
            }
        }
        let _ = io::copy(&mut limited.into_inner(), &mut io::sink());
    });
    rx
}

/// Gathers chunks until the pipe closes or `deadline` passes. Chunks already read are kept
/// either way.
fn collect(rx: &Receiver<Vec<u8>>, deadline: Instant) -> Vec<u8> {
    let mut out = Vec::new();
    while let Ok(chunk) = rx.recv_deadline(deadline) {
        out.extend(chunk);
    }
    while let Ok(chunk) = rx.try_recv() {
        out.extend(chunk);
    }
    out
}
