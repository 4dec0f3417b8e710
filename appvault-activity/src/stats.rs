//! Count summaries for the dashboard, profile and task pages.

use appvault_storage::{task_status, TaskStatus};
use appvault_types::Task;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub links: usize,
    pub pdfs: usize,
    pub passwords: usize,
    /// Tasks not yet completed.
    pub active_tasks: usize,
    pub completed_tasks: usize,
    pub streak: u32,
}

impl DashboardStats {
    pub fn new(links: usize, pdfs: usize, passwords: usize, tasks: &[Task], streak: u32) -> Self {
        let completed_tasks = tasks.iter().filter(|t| t.is_completed()).count();
        Self {
            links,
            pdfs,
            passwords,
            active_tasks: tasks.len() - completed_tasks,
            completed_tasks,
            streak,
        }
    }
}

/// Totals of everything the user has saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub links: usize,
    pub pdfs: usize,
    pub passwords: usize,
    pub tasks: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub today: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> Self {
        let mut stats = TaskStats {
            total: tasks.len(),
            ..Default::default()
        };
        for task in tasks {
            match task_status(task, today) {
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Overdue => stats.overdue += 1,
                TaskStatus::Today => stats.today += 1,
                TaskStatus::Pending => {}
            }
        }
        stats.pending = stats.total - stats.completed;
        stats
    }
}
