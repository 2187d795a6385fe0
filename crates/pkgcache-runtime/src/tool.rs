//! External package-manager invocation.
//!
//! The tool runs as a child process with both pipes drained on helper
//! threads, so a chatty tool can never block on a full pipe while the parent
//! waits. The parent polls for exit against a deadline and kills the child
//! when it passes.

use std::fmt;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum ToolError {
    /// The program could not be found on PATH
    NotFound { program: String },

    /// The program exists but could not be started
    Launch {
        program: String,
        source: std::io::Error,
    },

    /// The program exited unsuccessfully. `status` is `None` when it was
    /// terminated by a signal.
    Failed {
        status: Option<i32>,
        stderr: String,
    },

    /// The program did not finish within its time budget and was killed
    Timeout { after: Duration },

    /// Waiting on the child process failed
    Io(std::io::Error),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::NotFound { program } => {
                write!(f, "Package manager '{}' not found on PATH", program)
            }
            ToolError::Launch { program, source } => {
                write!(f, "Failed to start '{}': {}", program, source)
            }
            ToolError::Failed { status, stderr } => {
                match status {
                    Some(code) => write!(f, "Package manager exited with status {}", code)?,
                    None => write!(f, "Package manager was terminated by a signal")?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            ToolError::Timeout { after } => {
                write!(f, "Package manager timed out after {}s", after.as_secs())
            }
            ToolError::Io(err) => write!(f, "IO error while waiting for tool: {}", err),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Launch { source, .. } => Some(source),
            ToolError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Captured output of a successful invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// One command line plus its time budget.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn run(&self) -> Result<ToolOutput, ToolError> {
        tracing::debug!(program = %self.program, args = ?self.args, "spawning tool");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => ToolError::NotFound {
                    program: self.program.clone(),
                },
                _ => ToolError::Launch {
                    program: self.program.clone(),
                    source: err,
                },
            })?;

        let (tx, rx) = mpsc::channel();
        let mut pending = 0;
        if let Some(pipe) = child.stdout.take() {
            drain(pipe, Stream::Stdout, tx.clone());
            pending += 1;
        }
        if let Some(pipe) = child.stderr.take() {
            drain(pipe, Stream::Stderr, tx.clone());
            pending += 1;
        }
        drop(tx);

        let deadline = Instant::now() + self.timeout;

        let status = match wait_until(&mut child, deadline)? {
            Some(status) => status,
            None => {
                // Reader threads are left detached: a grandchild may still
                // hold the pipes open.
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(program = %self.program, timeout = ?self.timeout, "tool timed out");
                return Err(ToolError::Timeout {
                    after: self.timeout,
                });
            }
        };

        // The child is gone but a background helper it started may keep the
        // pipes open, so reading shares the same deadline.
        let Some(output) = collect(&rx, pending, deadline)? else {
            tracing::warn!(
                program = %self.program,
                timeout = ?self.timeout,
                "tool exited but its output pipes stayed open"
            );
            return Err(ToolError::Timeout {
                after: self.timeout,
            });
        };

        if !status.success() {
            return Err(ToolError::Failed {
                status: status.code(),
                stderr: output.stderr,
            });
        }

        tracing::debug!(bytes = output.stdout.len(), "tool finished");
        Ok(output)
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

type Chunk = (Stream, std::io::Result<Vec<u8>>);

fn wait_until(child: &mut Child, deadline: Instant) -> Result<Option<ExitStatus>, ToolError> {
    loop {
        match child.try_wait().map_err(ToolError::Io)? {
            Some(status) => return Ok(Some(status)),
            None => {
                if Instant::now() >= deadline {
                    return Ok(None);
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

fn drain<R>(mut reader: R, stream: Stream, tx: Sender<Chunk>)
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = reader.read_to_end(&mut buf).map(|_| buf);
        // The receiver is gone once the caller gave up waiting
        let _ = tx.send((stream, result));
    });
}

/// Gather both pipes, or `None` if the deadline passes first.
fn collect(
    rx: &Receiver<Chunk>,
    pending: usize,
    deadline: Instant,
) -> Result<Option<ToolOutput>, ToolError> {
    let mut output = ToolOutput::default();
    for _ in 0..pending {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let (stream, result) = match rx.recv_timeout(remaining) {
            Ok(chunk) => chunk,
            Err(RecvTimeoutError::Timeout) => return Ok(None),
            Err(RecvTimeoutError::Disconnected) => break,
        };
        let text = String::from_utf8_lossy(&result.map_err(ToolError::Io)?).into_owned();
        match stream {
            Stream::Stdout => output.stdout = text,
            Stream::Stderr => output.stderr = text,
        }
    }
    Ok(Some(output))
}
