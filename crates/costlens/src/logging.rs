//! File logging for the CLI
//!
//! Everything goes to `{data_dir}/costlens.log` so stdout stays clean for
//! report output. The file is trimmed from the front once it grows past
//! its size limit.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "costlens.log";

const ROTATED_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Size limits for the log file
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    /// Trim once the file grows beyond this many bytes
    pub max_size: u64,
    /// Bytes of the most recent output kept after trimming
    pub keep_size: u64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            max_size: 5 * 1024 * 1024,
            keep_size: 1024 * 1024,
        }
    }
}

impl Rotation {
    /// Trim `log_path` down to its tail when it exceeds `max_size`.
    ///
    /// The kept tail starts at a line boundary. Returns whether the file
    /// was rewritten.
    pub fn apply(&self, log_path: &Path) -> io::Result<bool> {
        let size = match fs::metadata(log_path) {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if size <= self.max_size {
            return Ok(false);
        }

        let mut tail = Vec::new();
        {
            let mut file = File::open(log_path)?;
            file.seek(SeekFrom::Start(size.saturating_sub(self.keep_size)))?;
            file.read_to_end(&mut tail)?;
        }

        let line_start = tail
            .iter()
            .position(|&b| b == b'\n')
            .map_or(0, |i| i + 1);

        let mut file = File::create(log_path)?;
        file.write_all(ROTATED_MARKER)?;
        file.write_all(&tail[line_start..])?;
        Ok(true)
    }
}

/// Hands out writers that share one open log file
#[derive(Clone)]
struct SharedLogFile {
    file: Arc<Mutex<File>>,
}

struct SharedLogWriter {
    file: Arc<Mutex<File>>,
}

impl SharedLogWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for SharedLogFile {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter {
            file: Arc::clone(&self.file),
        }
    }
}

/// Install the global subscriber writing to `{data_dir}/costlens.log`.
///
/// `RUST_LOG` takes precedence over `level`. Library events are capped at
/// `warn` unless `RUST_LOG` says otherwise.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE_NAME);

    if let Err(e) = Rotation::default().apply(&log_path) {
        eprintln!("Warning: failed to rotate {}: {e}", log_path.display());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let writer = SharedLogFile {
        file: Arc::new(Mutex::new(file)),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("costlens={level},costlens_core=warn")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    tracing::info!(log_path = %log_path.display(), "logging initialized");
    Ok(())
}
