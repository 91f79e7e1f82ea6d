//! Best-score persistence. The session only ever reads the stored value once
//! and then pushes strictly increasing values into it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Host-side storage for the best score across games.
pub trait BestScoreStore {
    /// Current stored best; 0 when nothing usable is stored.
    fn load(&self) -> u64;
    /// Record a new best. Callers only pass values above the last loaded/saved one.
    fn save(&mut self, best: u64) -> Result<(), StoreError>;
}

impl<T: BestScoreStore + ?Sized> BestScoreStore for Box<T> {
    fn load(&self) -> u64 {
        (**self).load()
    }

    fn save(&mut self, best: u64) -> Result<(), StoreError> {
        (**self).save(best)
    }
}

/// Keeps the best score in memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryBestScore {
    best: u64,
}

impl MemoryBestScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }
}

impl BestScoreStore for MemoryBestScore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, best: u64) -> Result<(), StoreError> {
        self.best = self.best.max(best);
        Ok(())
    }
}

/// Stores the best score as a decimal number in a plain text file.
///
/// A missing or unparsable file loads as 0.
#[derive(Debug, Clone)]
pub struct FileBestScore {
    path: PathBuf,
}

impl FileBestScore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileBestScore {
    fn load(&self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(s) => s.trim().parse().unwrap_or(0),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read best score");
                0
            }
        }
    }

    fn save(&mut self, best: u64) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, best.to_string())?;
        Ok(())
    }
}
