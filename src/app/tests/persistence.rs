//! Commit-time persistence and storage degradation tests.

use super::helpers::*;
use crate::fs::{FlapdeckPaths, load_tasks};
use ratatui::crossterm::event::KeyCode;

mod committing {
    use super::*;

    #[test]
    fn committed_edits_are_saved_and_the_board_rebuilt() {
        let (dir, mut app) = temp_app(&[]);
        finish_sweep(&mut app);

        app.handle_key(key(KeyCode::Enter)); // park; creates task 01
        app.handle_key(key(KeyCode::Char('h')));
        app.handle_key(key(KeyCode::Char('i')));
        app.handle_key(key(KeyCode::Enter)); // commit

        assert_eq!(app.board().tasks(), ["HI"]);
        assert_eq!(app.board().display_tasks(), ["01HI"]);
        // The fresh board re-runs its opening sweep.
        assert!(app.board().sweep_in_progress());

        let paths = FlapdeckPaths::new(dir.path());
        assert_eq!(load_tasks(&paths).unwrap(), ["HI"]);
    }

    #[test]
    fn emptying_a_task_removes_it_from_the_store() {
        let (dir, mut app) = temp_app(&["HI", "GO"]);
        finish_sweep(&mut app);

        // Select the second character of task 01 and erase the task.
        app.handle_mouse(left_click(17, 14)); // cell 51
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.board().tasks(), ["GO"]);
        let paths = FlapdeckPaths::new(dir.path());
        assert_eq!(load_tasks(&paths).unwrap(), ["GO"]);
    }

    #[test]
    fn enter_without_changes_commits_nothing() {
        let (dir, mut app) = temp_app(&["HI"]);
        finish_sweep(&mut app);
        app.handle_key(key(KeyCode::Enter)); // just parks
        assert!(!app.board().sweep_in_progress());

        let paths = FlapdeckPaths::new(dir.path());
        assert_eq!(load_tasks(&paths).unwrap(), ["HI"]);
    }
}

mod degradation {
    use super::*;

    #[test]
    fn a_corrupt_store_warns_once_and_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = FlapdeckPaths::new(dir.path());
        std::fs::create_dir_all(paths.flapdeck_dir()).unwrap();
        std::fs::write(paths.tasks_file(), "not json").unwrap();

        let app = crate::app::App::new_with_paths(&test_args(), 80, 24, paths).unwrap();
        assert!(app.storage_warning().is_some());
        assert_eq!(app.board().tasks().len(), crate::fs::DEFAULT_TASKS.len());
    }

    #[test]
    fn commits_keep_working_without_storage() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = FlapdeckPaths::new(dir.path());
        std::fs::create_dir_all(paths.flapdeck_dir()).unwrap();
        std::fs::write(paths.tasks_file(), "not json").unwrap();

        let mut app =
            crate::app::App::new_with_paths(&test_args(), 80, 60, paths.clone()).unwrap();
        finish_sweep(&mut app);

        // Edit the first default task down and commit; the board updates
        // even though nothing can be saved.
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.board().tasks()[0], "X");
        assert!(app.storage_warning().is_some());
        // The corrupt file was left untouched.
        assert_eq!(
            std::fs::read_to_string(paths.tasks_file()).unwrap(),
            "not json"
        );
    }
}
