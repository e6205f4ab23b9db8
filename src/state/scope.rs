//! Structured task scope owned by a screen.
//!
//! Work spawned here lives at most as long as the scope: dropping the
//! scope (or calling `cancel`) aborts every task still running.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

#[derive(Default)]
pub struct TaskScope {
    cancelled: AtomicBool,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `future` into the scope. Ignored once the scope is cancelled.
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_cancelled() {
            tracing::debug!("Task scope cancelled; spawn ignored");
            return;
        }
        let handle = tokio::spawn(future);
        let mut tasks = self.tasks.lock();
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Runs `future` inside the scope and waits for its output.
    ///
    /// Returns `None` when the scope is cancelled before the future
    /// completes.
    pub async fn run<F, T>(&self, future: F) -> Option<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (respond_to, receiver) = oneshot::channel();
        self.spawn(async move {
            let _ = respond_to.send(future.await);
        });
        receiver.await.ok()
    }

    /// Abort everything in flight and refuse new work.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            let tasks = std::mem::take(&mut *self.tasks.lock());
            tracing::debug!(tasks = tasks.len(), "Cancelling task scope");
            for task in tasks {
                task.abort();
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Tasks spawned and not yet finished.
    pub fn active(&self) -> usize {
        self.tasks
            .lock()
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.cancel();
    }
}
