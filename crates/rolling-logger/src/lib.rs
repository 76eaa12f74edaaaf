//! Rolling Logger
//!
//! Installs a global `tracing` subscriber that writes every event to
//! `<dir>/<app>.log`, rotating to `<app>.log.1`, `<app>.log.2`, ... once the
//! live file grows past a size limit. The most recent lines are also kept in
//! an in-memory circular buffer. `log` records are bridged into the same
//! subscriber.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static WRITER: OnceLock<RollingWriter> = OnceLock::new();

/// Logger errors
#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
    NotInitialized,
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "Logger already initialized"),
            LoggerError::NotInitialized => write!(f, "Logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Rotate once the live file would exceed this size
    pub max_file_bytes: u64,
    /// Rotated files kept besides the live one
    pub max_files: usize,
    /// Lines kept in memory for `recent_lines`
    pub buffer_lines: usize,
    /// Used when `RUST_LOG` is not set
    pub default_filter: String,
    /// Also print to stderr
    pub stderr: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 3,
            buffer_lines: 500,
            default_filter: "info".to_string(),
            stderr: false,
        }
    }
}

/// Initialize the global logger with default options.
///
/// Returns the path of the live log file.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<PathBuf, LoggerError> {
    init_with_options(log_dir, app_name, LoggerOptions::default())
}

pub fn init_with_options(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    options: LoggerOptions,
) -> Result<PathBuf, LoggerError> {
    if WRITER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let file = RollingFile::open(
        log_dir.as_ref(),
        app_name,
        options.max_file_bytes,
        options.max_files,
    )?;
    let path = file.live_path();
    let writer = RollingWriter::new(file, options.buffer_lines);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.default_filter));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_timer(LocalTime);
    let stderr_layer = options.stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_timer(LocalTime)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    let _ = WRITER.set(writer);
    tracing::info!(path = %path.display(), "Logger initialized");
    Ok(path)
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::error!("{}", msg);
    Ok(())
}

/// Most recent formatted lines, oldest first
pub fn recent_lines() -> Vec<String> {
    WRITER.get().map(RollingWriter::recent_lines).unwrap_or_default()
}

fn ensure_initialized() -> Result<(), LoggerError> {
    WRITER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

// ========================
// Circular line buffer
// ========================

#[derive(Debug)]
struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    partial: String,
}

impl RingBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            partial: String::new(),
        }
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(bytes));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            self.push_line(line.trim_end_matches(['\r', '\n']).to_string());
        }
    }

    fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

// ========================
// Size-rotated file
// ========================

#[derive(Debug)]
struct RollingFile {
    dir: PathBuf,
    app_name: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    fn open(dir: &Path, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let live = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&live)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            max_bytes,
            max_files,
            file,
            written,
        })
    }

    fn live_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.app_name))
    }

    fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.log.{}", self.app_name, index))
    }

    fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + bytes.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.max_files == 0 {
            self.file = File::create(self.live_path())?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.rotated_path(self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_files).rev() {
            let from = self.rotated_path(index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(index + 1))?;
            }
        }
        fs::rename(self.live_path(), self.rotated_path(1))?;

        self.file = OpenOptions::new().create(true).append(true).open(self.live_path())?;
        self.written = 0;
        Ok(())
    }
}

// ========================
// Writer handed to tracing
// ========================

#[derive(Debug)]
struct Sink {
    file: RollingFile,
    ring: RingBuffer,
}

#[derive(Debug, Clone)]
struct RollingWriter {
    sink: Arc<Mutex<Sink>>,
}

impl RollingWriter {
    fn new(file: RollingFile, buffer_lines: usize) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Sink {
                file,
                ring: RingBuffer::new(buffer_lines),
            })),
        }
    }

    fn recent_lines(&self) -> Vec<String> {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .ring
            .snapshot()
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.ring.push_bytes(buf);
        sink.file.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .file
            .file
            .flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
