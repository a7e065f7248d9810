// Append-only destinations for committed reservation records

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SINK_PATH: &str = "reservation.txt";

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// A sink receives one text block per successful reservation
pub trait ReservationSink: Send + Sync {
    fn append(&self, block: &str) -> Result<(), SinkError>;
}

// Opens the file in append mode for every write and adds a trailing newline
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new(DEFAULT_SINK_PATH)
    }
}

impl ReservationSink for FileSink {
    fn append(&self, block: &str) -> Result<(), SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(block.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        debug!(path = %self.path.display(), bytes = block.len() + 1, "appended reservation");
        Ok(())
    }
}

// Keeps blocks in memory, mostly for tests and dry runs
#[derive(Debug, Default)]
pub struct MemorySink {
    blocks: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> Vec<String> {
        self.blocks.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.blocks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.lock().is_empty()
    }
}

impl ReservationSink for MemorySink {
    fn append(&self, block: &str) -> Result<(), SinkError> {
        self.blocks.lock().push(block.to_string());
        Ok(())
    }
}
