//! Quiescence debounce for search inputs.
//!
//! Every pushed value restarts the window; only the latest value is
//! committed once the window elapses with no new input. Intermediate
//! values are dropped, never queued.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::sleep;

enum DebounceCommand<T> {
    Push(T),
    Cancel,
    Flush(oneshot::Sender<()>),
}

pub struct Debouncer<T> {
    sender: mpsc::UnboundedSender<DebounceCommand<T>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the debounce task. Must be called inside a tokio runtime.
    pub fn new<F>(window: Duration, on_commit: F) -> Self
    where
        F: Fn(T) + Send + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                match pending.take() {
                    None => match receiver.recv().await {
                        Some(DebounceCommand::Push(value)) => pending = Some(value),
                        Some(DebounceCommand::Cancel) => {}
                        Some(DebounceCommand::Flush(ack)) => {
                            let _ = ack.send(());
                        }
                        None => break,
                    },
                    Some(value) => {
                        tokio::select! {
                            command = receiver.recv() => match command {
                                Some(DebounceCommand::Push(next)) => pending = Some(next),
                                Some(DebounceCommand::Cancel) => {}
                                Some(DebounceCommand::Flush(ack)) => {
                                    on_commit(value);
                                    let _ = ack.send(());
                                }
                                None => break,
                            },
                            _ = sleep(window) => on_commit(value),
                        }
                    }
                }
            }
        });

        Self { sender, task }
    }

    /// Feed a new value; restarts the window.
    pub fn push(&self, value: T) {
        let _ = self.sender.send(DebounceCommand::Push(value));
    }

    /// Drop the pending value without committing it.
    pub fn cancel(&self) {
        let _ = self.sender.send(DebounceCommand::Cancel);
    }

    /// Commit the pending value now, if any, and wait for it.
    pub async fn flush(&self) {
        let (ack, receiver) = oneshot::channel();
        if self.sender.send(DebounceCommand::Flush(ack)).is_ok() {
            let _ = receiver.await;
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
