//! Append-only record storage for the leaderboard
//!
//! Records are single text lines. The store knows nothing about their
//! format; parsing lives with the leaderboard.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::StoreError;

/// Load-everything / append-one storage
pub trait RecordStore: Send {
    /// Full contents of the store
    fn load(&self) -> Result<String, StoreError>;

    /// Append one record (a trailing newline is added)
    fn append(&mut self, record: &str) -> Result<(), StoreError>;
}

/// Records kept in a text file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordStore for FileStore {
    fn load(&self) -> Result<String, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            // A missing file is an empty board
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn append(&mut self, record: &str) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        writeln!(file, "{}", record).map_err(|e| self.io_error(e))?;
        log::info!("Appended record to {}", self.path.display());
        Ok(())
    }
}

/// In-process store for tests and runs without a score file
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing contents
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<String, StoreError> {
        Ok(self.contents.clone())
    }

    fn append(&mut self, record: &str) -> Result<(), StoreError> {
        self.contents.push_str(record);
        self.contents.push('\n');
        Ok(())
    }
}
