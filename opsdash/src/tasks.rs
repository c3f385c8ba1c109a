//! Task list state and the sequencing/exclusion rules around task actions.

use std::sync::Mutex;

use futures::future::BoxFuture;

use crate::api::{ApiClient, ApiError};
use crate::types::Task;

/// Backend surface the controller drives. `ApiClient` implements it for
/// real use; tests inject fakes to observe call counts.
pub trait TaskBackend: Send + Sync {
    fn list(&self) -> BoxFuture<'static, Result<Vec<Task>, ApiError>>;
    fn create(&self, name: String, every_minutes: u32) -> BoxFuture<'static, Result<Task, ApiError>>;
    fn run_now(&self, id: String) -> BoxFuture<'static, Result<(), ApiError>>;
    fn delete(&self, id: String) -> BoxFuture<'static, Result<(), ApiError>>;
}

impl TaskBackend for ApiClient {
    fn list(&self) -> BoxFuture<'static, Result<Vec<Task>, ApiError>> {
        let c = self.clone();
        Box::pin(async move { c.tasks().await })
    }

    fn create(&self, name: String, every_minutes: u32) -> BoxFuture<'static, Result<Task, ApiError>> {
        let c = self.clone();
        Box::pin(async move { c.create_task(&name, every_minutes).await })
    }

    fn run_now(&self, id: String) -> BoxFuture<'static, Result<(), ApiError>> {
        let c = self.clone();
        Box::pin(async move { c.run_task(&id).await })
    }

    fn delete(&self, id: String) -> BoxFuture<'static, Result<(), ApiError>> {
        let c = self.clone();
        Box::pin(async move { c.delete_task(&id).await })
    }
}

/// Snapshot of the task panel. `busy` holds the id of the one action in
/// flight, if any.
#[derive(Debug, Clone, Default)]
pub struct TasksState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub busy: Option<String>,
    pub error: Option<String>,
}

/// What became of a guarded action request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Backend call settled successfully and the list was reloaded.
    Applied,
    /// Another action held the busy slot; nothing was sent.
    Busy,
    /// Backend call failed; the list was still reloaded.
    Failed,
}

pub struct TaskController<B: TaskBackend> {
    backend: B,
    state: Mutex<TasksState>,
}

impl<B: TaskBackend> TaskController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Mutex::new(TasksState::default()),
        }
    }

    pub fn snapshot(&self) -> TasksState {
        self.state.lock().unwrap().clone()
    }

    /// Fetch the authoritative list from the backend. On failure the
    /// previous list stays on screen alongside the error.
    pub async fn reload(&self) {
        self.state.lock().unwrap().loading = true;
        let res = self.backend.list().await;
        let mut s = self.state.lock().unwrap();
        s.loading = false;
        match res {
            Ok(tasks) => {
                s.tasks = tasks;
                s.error = None;
            }
            Err(e) => s.error = Some(e.to_string()),
        }
    }

    /// Create a task. Bad input fails locally without touching the network.
    /// On success the full list is reloaded rather than appending the
    /// returned task, so ordering and server-side defaults always match the
    /// backend.
    pub async fn create(&self, name: &str, every_minutes: u32) -> Result<(), ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("task name must not be empty".into()));
        }
        if every_minutes == 0 {
            return Err(ApiError::Validation(
                "interval must be at least one minute".into(),
            ));
        }
        self.backend.create(name.to_string(), every_minutes).await?;
        self.reload().await;
        Ok(())
    }

    pub async fn run_now(&self, id: &str) -> ActionOutcome {
        let fut = self.backend.run_now(id.to_string());
        self.guarded(id, fut).await
    }

    pub async fn remove(&self, id: &str) -> ActionOutcome {
        let fut = self.backend.delete(id.to_string());
        self.guarded(id, fut).await
    }

    // Busy-lock discipline: check-then-set happens under one lock guard
    // with no await in between, so two overlapping requests can never both
    // claim the slot. The list is reloaded even when the call fails, since
    // the backend may have partially applied the action.
    async fn guarded(&self, id: &str, fut: BoxFuture<'static, Result<(), ApiError>>) -> ActionOutcome {
        {
            let mut s = self.state.lock().unwrap();
            if s.busy.is_some() {
                tracing::debug!(id, "action refused: busy");
                return ActionOutcome::Busy;
            }
            s.busy = Some(id.to_string());
        }
        let res = fut.await;
        {
            let mut s = self.state.lock().unwrap();
            s.busy = None;
            if let Err(e) = &res {
                s.error = Some(e.to_string());
            }
        }
        self.reload().await;
        match res {
            Ok(()) => ActionOutcome::Applied,
            Err(_) => ActionOutcome::Failed,
        }
    }
}

/// Dashboard excerpt: most recently run tasks first, `None` last. A pure
/// sort-and-slice over the one shared list — never a second fetch.
pub fn top_recent(tasks: &[Task], n: usize) -> Vec<Task> {
    let mut v = tasks.to_vec();
    v.sort_by(|a, b| b.last_run.cmp(&a.last_run));
    v.truncate(n);
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, last_run_min: Option<i64>) -> Task {
        Task {
            id: id.into(),
            name: id.into(),
            every_minutes: 60,
            last_run: last_run_min
                .map(|m| Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap() + chrono::Duration::minutes(m)),
            status: "OK".into(),
            enabled: true,
        }
    }

    #[test]
    fn top_recent_sorts_descending_and_slices() {
        let tasks = vec![
            task("old", Some(0)),
            task("never", None),
            task("newest", Some(90)),
            task("mid", Some(45)),
        ];
        let top = top_recent(&tasks, 3);
        let ids: Vec<_> = top.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["newest", "mid", "old"]);
    }

    #[test]
    fn top_recent_handles_short_lists() {
        let tasks = vec![task("only", None)];
        assert_eq!(top_recent(&tasks, 3).len(), 1);
        assert!(top_recent(&[], 3).is_empty());
    }
}
