use crate::entity_store::EntityStore;
use crate::error::StorageResult;
use crate::kv::KeyValueStore;
use crate::search::{filter_records, RecordQuery};
use appvault_types::{
    new_record_id, Clock, CreateTaskRequest, Task, TaskCategory, UpdateTaskRequest,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Where a task stands relative to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Completed,
    Overdue,
    Today,
    Pending,
}

/// Completed wins; then a past due date is overdue, today's is today.
/// Tasks without a due date are pending.
pub fn task_status(task: &Task, today: NaiveDate) -> TaskStatus {
    if task.is_completed() {
        return TaskStatus::Completed;
    }
    match task.due_date {
        Some(due) if due < today => TaskStatus::Overdue,
        Some(due) if due == today => TaskStatus::Today,
        _ => TaskStatus::Pending,
    }
}

/// Status filter of the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    /// Every task not yet completed, overdue ones included.
    Pending,
    Completed,
    Overdue,
    Today,
}

impl TaskFilter {
    pub fn accepts(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.is_completed(),
            TaskFilter::Completed => task.is_completed(),
            TaskFilter::Overdue => task_status(task, today) == TaskStatus::Overdue,
            TaskFilter::Today => task_status(task, today) == TaskStatus::Today,
        }
    }
}

/// Notified after every saved change to the task collection.
pub trait TaskObserver: Send + Sync {
    fn tasks_changed(&self, tasks: &[Task], now: DateTime<Utc>);
}

/// To-do items.
#[derive(Clone)]
pub struct TaskRepository {
    store: EntityStore<Task>,
    clock: Arc<dyn Clock>,
    observers: Vec<Arc<dyn TaskObserver>>,
}

impl TaskRepository {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: EntityStore::new(kv),
            clock,
            observers: Vec::new(),
        }
    }

    /// Adds an observer run after each create, update, delete and toggle.
    pub fn observe(mut self, observer: Arc<dyn TaskObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn list(&self) -> Vec<Task> {
        self.store.load_all()
    }

    pub fn get(&self, id: &str) -> Option<Task> {
        self.store.get(id)
    }

    pub fn create(&self, request: CreateTaskRequest) -> StorageResult<Task> {
        request.validate()?;
        let task = request.into_task(new_record_id(), self.clock.now());
        let task = self.store.add(task)?;
        info!(task_id = %task.id, "Task created");
        self.notify();
        Ok(task)
    }

    /// Edits details; completion state is left as it is.
    pub fn update(&self, id: &str, request: UpdateTaskRequest) -> StorageResult<Task> {
        request.validate()?;
        let task = self.store.update(id, |task| request.apply(task))?;
        self.notify();
        Ok(task)
    }

    pub fn delete(&self, id: &str) -> StorageResult<Task> {
        let removed = self.store.delete(id)?;
        info!(task_id = %id, "Task deleted");
        self.notify();
        Ok(removed)
    }

    /// Completes a pending task at "now", or reopens a completed one.
    pub fn toggle_completed(&self, id: &str) -> StorageResult<Task> {
        let now = self.clock.now();
        let task = self.store.update(id, |task| task.toggle_completed(now))?;
        info!(task_id = %id, completed = task.is_completed(), "Task toggled");
        self.notify();
        Ok(task)
    }

    /// Tasks matching `query` (title or description, category) and `filter`
    /// on `today`.
    pub fn search(
        &self,
        query: &RecordQuery<TaskCategory>,
        filter: TaskFilter,
        today: NaiveDate,
    ) -> Vec<Task> {
        filter_records(self.list(), query)
            .into_iter()
            .filter(|t| filter.accepts(t, today))
            .collect()
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let tasks = self.list();
        let now = self.clock.now();
        for observer in &self.observers {
            observer.tasks_changed(&tasks, now);
        }
    }
}
