//! File system operations.

use std::path::{Path, PathBuf};

pub mod store;

pub use store::{DEFAULT_TASKS, StoreError, load_tasks, save_tasks};

/// Directory for flapdeck data files.
pub const FLAPDECK_DIR: &str = ".flapdeck";

/// Path to the tasks file, relative to the base directory.
pub const TASKS_FILE: &str = ".flapdeck/tasks.json";

/// Holds all flapdeck-related paths derived from a base directory.
///
/// This struct enables dependency injection of filesystem paths, allowing
/// tests to use isolated temporary directories instead of the actual working
/// directory. In production, the base is typically the current working
/// directory, and the tasks file can be overridden from the command line.
#[derive(Debug, Clone)]
pub struct FlapdeckPaths {
    base: PathBuf,
    /// Explicit tasks file location, when the user supplied one.
    tasks_override: Option<PathBuf>,
}

impl FlapdeckPaths {
    /// Creates paths rooted at the given base directory.
    #[must_use]
    pub fn new(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
            tasks_override: None,
        }
    }

    /// Creates paths rooted at the current working directory.
    ///
    /// # Panics
    ///
    /// Panics if the current directory cannot be determined.
    #[must_use]
    #[allow(clippy::expect_used)] // Documented panic - fundamental requirement for app startup.
    pub fn from_cwd() -> Self {
        Self::new(&std::env::current_dir().expect("Failed to get current directory"))
    }

    /// Uses an explicit tasks file instead of the default location.
    #[must_use]
    pub fn with_tasks_file(mut self, path: PathBuf) -> Self {
        self.tasks_override = Some(path);
        self
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the `.flapdeck` directory path.
    #[must_use]
    pub fn flapdeck_dir(&self) -> PathBuf {
        self.base.join(FLAPDECK_DIR)
    }

    /// Returns the tasks file path (`.flapdeck/tasks.json`, unless
    /// overridden).
    #[must_use]
    pub fn tasks_file(&self) -> PathBuf {
        self.tasks_override
            .clone()
            .unwrap_or_else(|| self.base.join(TASKS_FILE))
    }
}
