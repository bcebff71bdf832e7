//! Where arbor keeps its files, and rotation of its log.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use directories::ProjectDirs;

/// File the running session logs to.
pub const LATEST_LOG: &str = "latest.log";

/// Archived logs kept after a rotation.
pub const KEEP_LOGS: usize = 10;

/// Per-user directories, resolved once from the platform conventions
/// (XDG on Linux).
#[derive(Debug, Clone)]
pub struct AppDirs {
    dirs: ProjectDirs,
}

impl AppDirs {
    /// None when no home directory can be found.
    pub fn locate() -> Option<Self> {
        ProjectDirs::from("dev", "arbor", "arbor").map(|dirs| Self { dirs })
    }

    /// `config.json` in the config directory.
    pub fn config_file(&self) -> PathBuf {
        self.dirs.config_dir().join("config.json")
    }

    /// Default catalog, `catalog.json` in the data directory.
    pub fn catalog_file(&self) -> PathBuf {
        self.dirs.data_dir().join("catalog.json")
    }

    pub fn log_dir(&self) -> &Path {
        self.dirs.cache_dir()
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir().join(LATEST_LOG)
    }

    pub fn log_rotation(&self) -> LogRotation {
        LogRotation::new(self.log_dir())
    }
}

/// Moves the previous session's log aside and prunes old archives.
#[derive(Debug, Clone)]
pub struct LogRotation {
    dir: PathBuf,
    keep: usize,
}

impl LogRotation {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            keep: KEEP_LOGS,
        }
    }

    pub fn keep(mut self, keep: usize) -> Self {
        self.keep = keep;
        self
    }

    /// Rotate now. Returns the archive the previous log was moved to, if
    /// there was one.
    pub fn rotate(&self) -> io::Result<Option<PathBuf>> {
        self.rotate_at(Local::now())
    }

    /// Archives are named by `now`, so they sort oldest first by name.
    pub fn rotate_at(&self, now: DateTime<Local>) -> io::Result<Option<PathBuf>> {
        let latest = self.dir.join(LATEST_LOG);
        let archived = match fs::metadata(&latest) {
            Ok(_) => {
                let to = self.dir.join(format!("{}.log", now.format("%Y%m%d_%H%M%S")));
                fs::rename(&latest, &to)?;
                Some(to)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };
        self.prune()?;
        Ok(archived)
    }

    fn archives(&self) -> io::Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_archive = path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG);
            if is_archive {
                found.push(path);
            }
        }
        found.sort();
        Ok(found)
    }

    fn prune(&self) -> io::Result<()> {
        let archives = match self.archives() {
            Ok(archives) => archives,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        let excess = archives.len().saturating_sub(self.keep);
        for old in &archives[..excess] {
            fs::remove_file(old)?;
        }
        Ok(())
    }
}
