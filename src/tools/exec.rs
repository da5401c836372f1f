use crate::{config::Config, errors::{VodError, VodResult}};
use std::{ffi::OsStr, io, path::{Path, PathBuf}, process::Stdio};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    process::Command,
    sync::mpsc,
};
use tracing::debug;

/// `None` when the child was terminated by a signal.
pub type ExitCode = Option<i32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    pass_env: Vec<String>,
}

impl ExecOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self { pass_env: cfg.exec.pass_env.clone() }
    }

    pub fn pass_env(mut self, keys: Vec<String>) -> Self {
        self.pass_env = keys;
        self
    }
}

/// Run `command` (program then args), relaying both output streams to stdout.
pub async fn exec<S: AsRef<OsStr>>(command: &[S]) -> VodResult<ExitCode> {
    exec_with(command, &ExecOptions::default(), &mut tokio::io::stdout()).await
}

pub async fn exec_to<S, W>(command: &[S], sink: &mut W) -> VodResult<ExitCode>
where
    S: AsRef<OsStr>,
    W: AsyncWrite + Unpin,
{
    exec_with(command, &ExecOptions::default(), sink).await
}

/// Spawn the command with piped stdout/stderr, drain both concurrently into
/// `sink` as decoded text, then wait for exit. Returns only after both
/// streams hit EOF and the child is reaped. No stream provenance is kept.
pub async fn exec_with<S, W>(command: &[S], opts: &ExecOptions, sink: &mut W) -> VodResult<ExitCode>
where
    S: AsRef<OsStr>,
    W: AsyncWrite + Unpin,
{
    let (program, args) = command.split_first().ok_or(VodError::EmptyCommand)?;
    let program = program.as_ref();
    let full = resolve_program(program)?;

    let mut cmd = Command::new(&full);
    cmd.args(args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true);
    if !opts.pass_env.is_empty() {
        cmd.env_clear();
        for k in &opts.pass_env {
            if let Ok(v) = std::env::var(k) {
                cmd.env(k, v);
            }
        }
    }

    let mut child = cmd.spawn().map_err(|source| spawn_error(program, source))?;
    debug!(program = %full.display(), pid = ?child.id(), "spawned");

    let stdout = child.stdout.take().ok_or_else(|| VodError::Stream("stdout not captured".into()))?;
    let stderr = child.stderr.take().ok_or_else(|| VodError::Stream("stderr not captured".into()))?;

    let (tx, mut rx) = mpsc::channel::<String>(32);
    let out_task = tokio::spawn(drain(stdout, StreamKind::Stdout, tx.clone()));
    let err_task = tokio::spawn(drain(stderr, StreamKind::Stderr, tx));

    // Channel closes once both drains have dropped their senders.
    while let Some(text) = rx.recv().await {
        sink.write_all(text.as_bytes()).await.map_err(|e| VodError::Stream(e.to_string()))?;
        sink.flush().await.map_err(|e| VodError::Stream(e.to_string()))?;
    }

    let (out_res, err_res) = futures::future::join(out_task, err_task).await;
    for res in [out_res, err_res] {
        res.map_err(|e| VodError::Internal(e.to_string()))?
            .map_err(|e| VodError::Stream(e.to_string()))?;
    }

    let status = child.wait().await.map_err(|e| VodError::Stream(e.to_string()))?;
    debug!(program = %full.display(), code = ?status.code(), "exited");
    Ok(status.code())
}

fn resolve_program(program: &OsStr) -> VodResult<PathBuf> {
    let has_dir = Path::new(program).parent().map(|p| !p.as_os_str().is_empty()).unwrap_or(false);
    if has_dir {
        return Ok(PathBuf::from(program));
    }
    which::which(program).map_err(|e| spawn_error(program, io::Error::new(io::ErrorKind::NotFound, e.to_string())))
}

fn spawn_error(program: &OsStr, source: io::Error) -> VodError {
    VodError::Spawn { program: program.to_string_lossy().into_owned(), source }
}

async fn drain<R>(mut reader: R, kind: StreamKind, tx: mpsc::Sender<String>) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 8192];
    let mut decoder = Utf8Decoder::default();
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        total += n as u64;
        let text = decoder.decode(&buf[..n]);
        if !text.is_empty() && tx.send(text).await.is_err() {
            // sink side gave up
            return Ok(total);
        }
    }
    let tail = decoder.finish();
    if !tail.is_empty() {
        let _ = tx.send(tail).await;
    }
    debug!(stream = kind.as_str(), bytes = total, "drained");
    Ok(total)
}

/// Incremental UTF-8 decoder. An incomplete trailing sequence is held until
/// the next chunk; invalid bytes become U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);
        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    out.push_str(s);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    if let Ok(s) = std::str::from_utf8(valid) {
                        out.push_str(s);
                    }
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }
        self.pending = rest.to_vec();
        out
    }

    pub fn finish(&mut self) -> String {
        let pending = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&pending).into_owned()
    }
}
