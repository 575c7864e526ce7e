//! Task list persistence.
//!
//! Tasks are stored as JSON in `.flapdeck/tasks.json`. The store is a plain
//! last-write-wins string list: every committed edit saves the whole list.
//! A missing file is a first run and seeds the built-in instructional tasks;
//! anything the board cannot display (lowercase, characters outside the flap
//! ramp) is normalized on load rather than rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::CHAR_RAMP;

use super::FlapdeckPaths;

/// Tasks seeded on first run, doubling as usage instructions.
pub const DEFAULT_TASKS: &[&str] = &[
    "ANY CHANGES YOU MAKE TO YOUR TO-DO LIST ARE SAVED AUTOMATICALLY",
    "CLICK A CELL IN A TASK ROW AND START TYPING TO EDIT THE TASK",
    "PRESS ENTER TO MOVE TO THE NEXT TASK OR TO WRITE A NEW TASK",
    "WHEN YOU'RE DONE TYPING, PRESS ENTER TO SUBMIT AND WATCH THE BOARD REFRESH",
    "TO DELETE A TASK, CLEAR IT WITH THE BACKSPACE KEY, THEN PRESS ENTER",
];

/// Errors from the task store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access the tasks file: {0}")]
    Io(#[from] std::io::Error),
    #[error("the tasks file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape of the tasks file.
#[derive(Debug, Serialize, Deserialize)]
struct TaskFile {
    tasks: Vec<String>,
}

/// Loads the task list, seeding the defaults when no file exists yet.
///
/// Loaded tasks are normalized to the board's character set: letters are
/// uppercased and anything the flaps cannot show is dropped.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load_tasks(paths: &FlapdeckPaths) -> Result<Vec<String>, StoreError> {
    let path = paths.tasks_file();
    if !path.exists() {
        return Ok(DEFAULT_TASKS.iter().map(ToString::to_string).collect());
    }
    let raw = std::fs::read_to_string(&path)?;
    let file: TaskFile = serde_json::from_str(&raw)?;
    Ok(file.tasks.iter().map(|t| normalize(t)).collect())
}

/// Saves the task list, creating the data directory if needed.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or the file cannot
/// be written.
pub fn save_tasks(paths: &FlapdeckPaths, tasks: &[String]) -> Result<(), StoreError> {
    let path = paths.tasks_file();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = TaskFile {
        tasks: tasks.to_vec(),
    };
    std::fs::write(&path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}

/// Uppercases and strips a task down to the characters a flap can display.
fn normalize(task: &str) -> String {
    task.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| CHAR_RAMP.contains(*c))
        .collect()
}

/// True when the base directory is writable enough for persistence; used to
/// warn once at startup instead of failing on every commit.
#[must_use]
pub fn storage_available(base: &Path) -> bool {
    let probe = base.join(".flapdeck/.probe");
    if std::fs::create_dir_all(base.join(super::FLAPDECK_DIR)).is_err() {
        return false;
    }
    let ok = std::fs::write(&probe, b"probe").is_ok();
    let _ = std::fs::remove_file(&probe);
    ok
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn temp_paths() -> (TempDir, FlapdeckPaths) {
        let dir = TempDir::new().expect("temp dir");
        let paths = FlapdeckPaths::new(dir.path());
        (dir, paths)
    }

    // =========================================================================
    // Load / Save Round Trip
    // =========================================================================

    mod round_trip {
        use super::*;

        #[test]
        fn save_then_load_preserves_tasks() {
            let (_dir, paths) = temp_paths();
            let tasks = vec!["PAY RENT".to_string(), "CALL MOM".to_string()];
            save_tasks(&paths, &tasks).unwrap();
            assert_eq!(load_tasks(&paths).unwrap(), tasks);
        }

        #[test]
        fn save_creates_the_data_directory() {
            let (dir, paths) = temp_paths();
            save_tasks(&paths, &[]).unwrap();
            assert!(dir.path().join(".flapdeck/tasks.json").exists());
        }

        #[test]
        fn empty_list_round_trips() {
            let (_dir, paths) = temp_paths();
            save_tasks(&paths, &[]).unwrap();
            assert_eq!(load_tasks(&paths).unwrap(), Vec::<String>::new());
        }
    }

    // =========================================================================
    // First Run and Normalization
    // =========================================================================

    mod first_run {
        use super::*;

        #[test]
        fn missing_file_seeds_the_default_tasks() {
            let (_dir, paths) = temp_paths();
            let tasks = load_tasks(&paths).unwrap();
            assert_eq!(tasks.len(), DEFAULT_TASKS.len());
            assert_eq!(tasks[0], DEFAULT_TASKS[0]);
        }

        #[test]
        fn default_tasks_only_use_displayable_characters() {
            for task in DEFAULT_TASKS {
                assert!(
                    task.chars().all(|c| CHAR_RAMP.contains(c)),
                    "undisplayable character in {task:?}"
                );
            }
        }
    }

    mod normalization {
        use super::*;

        #[test]
        fn lowercase_is_uppercased_on_load() {
            let (_dir, paths) = temp_paths();
            std::fs::create_dir_all(paths.flapdeck_dir()).unwrap();
            std::fs::write(
                paths.tasks_file(),
                r#"{"tasks": ["buy milk", "send 3 emails!"]}"#,
            )
            .unwrap();
            assert_eq!(load_tasks(&paths).unwrap(), ["BUY MILK", "SEND 3 EMAILS!"]);
        }

        #[test]
        fn undisplayable_characters_are_dropped() {
            let (_dir, paths) = temp_paths();
            std::fs::create_dir_all(paths.flapdeck_dir()).unwrap();
            std::fs::write(paths.tasks_file(), r#"{"tasks": ["café run\t~"]}"#).unwrap();
            assert_eq!(load_tasks(&paths).unwrap(), ["CAF RUN"]);
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    mod errors {
        use super::*;

        #[test]
        fn malformed_json_is_a_parse_error() {
            let (_dir, paths) = temp_paths();
            std::fs::create_dir_all(paths.flapdeck_dir()).unwrap();
            std::fs::write(paths.tasks_file(), "not json").unwrap();
            assert!(matches!(load_tasks(&paths), Err(StoreError::Parse(_))));
        }

        #[test]
        fn storage_probe_succeeds_in_a_writable_directory() {
            let (dir, _paths) = temp_paths();
            assert!(storage_available(dir.path()));
        }
    }

    // =========================================================================
    // Working Directory Default
    // =========================================================================

    mod cwd_default {
        use super::*;
        use std::sync::Mutex;

        /// Mutex to serialize tests that modify the current working directory.
        static CWD_MUTEX: Mutex<()> = Mutex::new(());

        /// Guard struct that restores the original directory when dropped.
        struct CwdGuard {
            original_dir: std::path::PathBuf,
            #[allow(dead_code)] // Field is held for RAII locking
            mutex_guard: std::sync::MutexGuard<'static, ()>,
        }

        impl CwdGuard {
            fn new() -> Self {
                let mutex_guard = CWD_MUTEX
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                Self {
                    original_dir: std::env::current_dir().unwrap(),
                    mutex_guard,
                }
            }
        }

        impl Drop for CwdGuard {
            fn drop(&mut self) {
                let _ = std::env::set_current_dir(&self.original_dir);
            }
        }

        #[test]
        #[serial]
        fn from_cwd_reads_and_writes_under_the_working_directory() {
            let _guard = CwdGuard::new();
            let dir = TempDir::new().unwrap();
            std::env::set_current_dir(dir.path()).unwrap();

            let paths = FlapdeckPaths::from_cwd();
            save_tasks(&paths, &["SHIP IT".to_string()]).unwrap();
            assert!(std::path::Path::new(crate::fs::TASKS_FILE).exists());
            assert_eq!(load_tasks(&paths).unwrap(), ["SHIP IT"]);
        }
    }
}
