//! Keyed async tasks
//!
//! Every task runs under a [`TaskKey`]. Starting a task under a key that is
//! already running aborts the old one first, so at most one task per key is
//! ever alive. That gives two behaviours the app relies on:
//!
//! - `debounce`: sleep, then run; calling again restarts the timer
//! - `spawn`: run now; a newer request supersedes an in-flight one
//!
//! ```ignore
//! tasks.debounce("suggest", Duration::from_millis(500), async move {
//!     match client.suggest_cities(&query).await {
//!         Ok(found) => Action::SuggestDidLoad { generation, suggestions: found },
//!         Err(_) => Action::SuggestDidFail { generation },
//!     }
//! });
//! ```
//!
//! Finished tasks stay registered until their key is reused or cancelled;
//! aborting a finished task is a no-op.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::Action;

/// Identifies a task for replacement and cancellation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

/// Registry of running tasks; each finished task sends one action.
pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> TaskManager<A>
where
    A: Action,
{
    /// Completed tasks send their action on `action_tx`.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Run `future` now, aborting any task under the same key.
    ///
    /// An aborted task never sends its action.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.start(key.into(), None, future)
    }

    /// Run `future` after `delay` of quiet, aborting any task under the same
    /// key. Calling again before the delay expires restarts the wait.
    pub fn debounce<F>(&mut self, key: impl Into<TaskKey>, delay: Duration, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.start(key.into(), Some(delay), future)
    }

    fn start<F>(&mut self, key: TaskKey, delay: Option<Duration>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.cancel(&key);

        tracing::trace!(task = key.name(), ?delay, "starting task");
        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let action = future.await;
            // Receiver gone means the runtime is shutting down
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Abort the task under `key`, if any.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            if !handle.is_finished() {
                tracing::trace!(task = key.name(), "aborting task");
            }
            handle.abort();
        }
    }

    /// Abort everything. Called on shutdown.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
