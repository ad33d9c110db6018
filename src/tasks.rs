use crate::types::{LiveTask, TaskState};

/// Scheduler key of the "scan all libraries" task.
pub const REFRESH_LIBRARY_KEY: &str = "RefreshLibrary";

/// First live task that refreshes all libraries, if the scheduler lists one.
pub fn find_refresh_task(tasks: &[LiveTask]) -> Option<&LiveTask> {
    tasks.iter().find(|t| t.key == REFRESH_LIBRARY_KEY)
}

pub fn is_running(task: &LiveTask) -> bool {
    task.state == TaskState::Running
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, key: &str, state: TaskState) -> LiveTask {
        LiveTask { id: id.into(), key: key.into(), name: String::new(), state, current_progress_percentage: None }
    }

    #[test]
    fn finds_first_refresh_task() {
        let tasks = vec![
            task("1", "CleanCache", TaskState::Idle),
            task("2", REFRESH_LIBRARY_KEY, TaskState::Running),
            task("3", REFRESH_LIBRARY_KEY, TaskState::Idle),
        ];
        let found = find_refresh_task(&tasks).map(|t| t.id.as_str());
        assert_eq!(found, Some("2"));
        assert!(is_running(find_refresh_task(&tasks).unwrap()));
    }

    #[test]
    fn absent_when_no_refresh_task() {
        assert!(find_refresh_task(&[task("1", "CleanCache", TaskState::Idle)]).is_none());
        assert!(find_refresh_task(&[]).is_none());
    }
}
