//! Subprocess-backed extractor.
//!
//! Runs an external program (typically a script that calls the OCR service and
//! a language model), pipes the document bytes to its stdin and reads a JSON
//! object of extracted fields from its stdout.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

use super::extractor::{DocumentInput, ExtractionError, FieldExtractor};
use crate::validation::ExtractedRecord;

/// Default wall-clock limit for one extraction.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Maximum stdout or stderr size captured per stream (10 MiB).
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Maximum stderr length quoted in a [`ExtractionError::Failed`].
const MAX_STDERR_CHARS: usize = 2_000;

/// Extractor that delegates to an external program.
///
/// The program receives the document on stdin and these environment
/// variables: `DOCSCAN_DOCUMENT_TYPE`, `DOCSCAN_FILE_NAME`,
/// `DOCSCAN_MIME_TYPE`, `DOCSCAN_REQUEST_ID`. It must print one JSON object
/// and exit with status 0.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Parse a whitespace-separated command line such as
    /// `python3 extract.py --model llama3`. Returns `None` when blank.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program).with_args(parts))
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn run(&self, input: &DocumentInput) -> Result<ExtractedRecord, ExtractionError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env("DOCSCAN_DOCUMENT_TYPE", input.document_type.to_string())
            .env("DOCSCAN_FILE_NAME", &input.file_name)
            .env("DOCSCAN_MIME_TYPE", &input.mime_type)
            .env("DOCSCAN_REQUEST_ID", input.request_id.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // The child is killed if it outlives the timeout below.
            .kill_on_drop(true);

        let start = Instant::now();
        let mut child = cmd.spawn()?;

        let stdout_task = tokio::spawn(read_stream("stdout", child.stdout.take()));
        let stderr_task = tokio::spawn(read_stream("stderr", child.stderr.take()));
        let stdin_task = child.stdin.take().map(|mut stdin| {
            let bytes = input.bytes.clone();
            tokio::spawn(async move {
                // The program may close stdin early; that is its choice.
                let _ = stdin.write_all(&bytes).await;
            })
        });

        // A grandchild may still hold the pipes after the child is gone.
        let abort_io = || {
            stdout_task.abort();
            stderr_task.abort();
            if let Some(task) = &stdin_task {
                task.abort();
            }
        };

        let status = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                abort_io();
                return Err(e.into());
            }
            Err(_elapsed) => {
                abort_io();
                return Err(ExtractionError::Timeout {
                    elapsed_ms: start.elapsed().as_millis() as u64,
                });
            }
        };

        let stdout_bytes = stdout_task.await.map_err(std::io::Error::other)??;
        // Stderr only feeds the failure message; read errors were logged.
        let stderr_bytes = match stderr_task.await {
            Ok(Ok(bytes)) => bytes,
            _ => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(ExtractionError::Failed {
                exit_code: status.code().unwrap_or(-1),
                stderr: stderr.trim().chars().take(MAX_STDERR_CHARS).collect(),
            });
        }

        let stdout = String::from_utf8_lossy(&stdout_bytes);
        let value: serde_json::Value = serde_json::from_str(stdout.trim())
            .map_err(|e| ExtractionError::Malformed(format!("stdout is not JSON: {e}")))?;

        ExtractedRecord::from_json(value).map_err(|e| ExtractionError::Malformed(e.to_string()))
    }
}

impl FieldExtractor for CommandExtractor {
    async fn extract(&self, input: &DocumentInput) -> Result<ExtractedRecord, ExtractionError> {
        tracing::debug!(
            request_id = %input.request_id,
            program = %self.program,
            bytes = input.bytes.len(),
            "Running extractor command",
        );
        self.run(input).await
    }
}

/// Read an entire output stream into a byte buffer, capped at [`MAX_OUTPUT_BYTES`].
async fn read_stream<R: AsyncRead + Unpin>(
    stream: &'static str,
    handle: Option<R>,
) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(h) = handle {
        if let Err(e) = h.take(MAX_OUTPUT_BYTES as u64).read_to_end(&mut buf).await {
            tracing::warn!(
                stream,
                error = %e,
                bytes_read = buf.len(),
                "Failed to read extractor output",
            );
            return Err(e);
        }
    }
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
