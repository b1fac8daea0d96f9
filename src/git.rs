//! Git operations using the system git command
//!
//! Clones run as a child process so that SSH keys, credential helpers and
//! `~/.gitconfig` all apply. Output from both pipes is forwarded line by
//! line while the clone runs.

use std::collections::VecDeque;
use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;

use log::debug;

use crate::error::{Error, Result};

/// Number of trailing stderr lines kept for error messages.
const STDERR_TAIL_LINES: usize = 20;

/// Which pipe a line of subprocess output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Clone `url` into `target_dir` using the system git command.
///
/// `target_dir` must be absent or empty; git refuses to clone into a
/// non-empty directory. Output is handed to `on_line` as it arrives, one
/// line at a time.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Any authentication configured in ~/.gitconfig
pub fn clone_streaming<F>(
    program: &OsStr,
    url: &str,
    target_dir: &Path,
    mut on_line: F,
) -> Result<()>
where
    F: FnMut(Stream, &str),
{
    debug!(
        "Running {} clone {} {}",
        program.to_string_lossy(),
        url,
        target_dir.display()
    );

    let mut child = Command::new(program)
        .arg("clone")
        .arg(url)
        .arg(target_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::CloneFailed {
            url: url.to_string(),
            status: None,
            message: format!("failed to run {}: {}", program.to_string_lossy(), e),
            hint: Some("Make sure git is installed and on PATH".to_string()),
        })?;

    let (tx, rx) = mpsc::channel::<(Stream, String)>();
    let mut readers = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        readers.push(forward_lines(stdout, Stream::Stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(forward_lines(stderr, Stream::Stderr, tx.clone()));
    }
    drop(tx);

    let mut stderr_tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);
    for (stream, line) in rx {
        on_line(stream, &line);
        if stream == Stream::Stderr {
            if stderr_tail.len() == STDERR_TAIL_LINES {
                stderr_tail.pop_front();
            }
            stderr_tail.push_back(line);
        }
    }

    for reader in readers {
        // A panicking reader only loses output, the exit status still decides.
        let _ = reader.join();
    }

    let status = child.wait()?;
    if status.success() {
        return Ok(());
    }

    let stderr = Vec::from(stderr_tail).join("\n");
    let message = if stderr.trim().is_empty() {
        format!("git exited with {}", status)
    } else {
        stderr.clone()
    };

    Err(Error::CloneFailed {
        url: url.to_string(),
        status: status.code(),
        message,
        hint: auth_hint(&stderr),
    })
}

/// Read `pipe` line by line and send each line down `tx`.
///
/// Git rewrites progress lines with `\r`, so those are split too.
fn forward_lines<R>(
    pipe: R,
    stream: Stream,
    tx: mpsc::Sender<(Stream, String)>,
) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&buf);
                    for line in text.split(['\r', '\n']).filter(|l| !l.is_empty()) {
                        if tx.send((stream, line.to_string())).is_err() {
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Provide a helpful hint for common authentication failures.
fn auth_hint(stderr: &str) -> Option<String> {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
        || stderr.contains("Host key verification failed")
    {
        Some(
            "Make sure you have access to the repository: \
             the SSH key must be loaded into ssh-agent and the host must be known"
                .to_string(),
        )
    } else {
        None
    }
}
