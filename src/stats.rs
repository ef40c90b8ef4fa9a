use serde::Serialize;

use crate::tasks::types::{Status, Task};

/// Read-only projection over the task collection; recomputed on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub running: usize,
    pub completed: usize,
    pub failed: usize,
}

pub fn project(tasks: &[Task]) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };

    for task in tasks {
        match task.status {
            Status::Pending => stats.pending += 1,
            Status::Running => stats.running += 1,
            Status::Completed => stats.completed += 1,
            Status::Failed => stats.failed += 1,
        }
    }

    stats
}
