//! Single-writer state container.
//!
//! One task owns the state. Intents arrive over an mpsc channel and are
//! reduced strictly in arrival order; every new state is published on a
//! `watch` channel. Nothing else can write the state.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::state::mvi::Reducer;

enum StoreCommand<I, S> {
    Dispatch(I),
    Apply {
        intent: I,
        respond_to: oneshot::Sender<S>,
    },
    Settle {
        respond_to: oneshot::Sender<S>,
    },
}

pub struct Store<R: Reducer> {
    sender: mpsc::UnboundedSender<StoreCommand<R::Intent, R::State>>,
    state: watch::Receiver<R::State>,
    task: JoinHandle<()>,
}

impl<R> Store<R>
where
    R: Reducer + 'static,
{
    /// Spawns the owning task. Must be called inside a tokio runtime.
    pub fn new(initial: R::State) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(initial);

        let task = tokio::spawn(async move {
            while let Some(command) = receiver.recv().await {
                match command {
                    StoreCommand::Dispatch(intent) => reduce::<R>(&state_tx, intent),
                    StoreCommand::Apply { intent, respond_to } => {
                        reduce::<R>(&state_tx, intent);
                        let _ = respond_to.send(state_tx.borrow().clone());
                    }
                    StoreCommand::Settle { respond_to } => {
                        let _ = respond_to.send(state_tx.borrow().clone());
                    }
                }
            }
        });

        Self {
            sender,
            state,
            task,
        }
    }

    /// Fire and forget.
    pub fn dispatch(&self, intent: R::Intent) {
        if self.sender.send(StoreCommand::Dispatch(intent)).is_err() {
            tracing::debug!("Store closed; intent dropped");
        }
    }

    /// Reduces `intent` and returns the resulting state.
    pub async fn apply(&self, intent: R::Intent) -> R::State {
        let (respond_to, receiver) = oneshot::channel();
        if self
            .sender
            .send(StoreCommand::Apply { intent, respond_to })
            .is_err()
        {
            return self.snapshot();
        }
        receiver.await.unwrap_or_else(|_| self.snapshot())
    }

    /// Waits until every intent sent before this call has been reduced.
    pub async fn settle(&self) -> R::State {
        let (respond_to, receiver) = oneshot::channel();
        if self.sender.send(StoreCommand::Settle { respond_to }).is_err() {
            return self.snapshot();
        }
        receiver.await.unwrap_or_else(|_| self.snapshot())
    }

    pub fn snapshot(&self) -> R::State {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.state.clone()
    }

    /// Cloneable sender for tasks that outlive a borrow of the store.
    pub fn dispatcher(&self) -> Dispatcher<R> {
        Dispatcher {
            sender: self.sender.clone(),
        }
    }
}

impl<R: Reducer> Drop for Store<R> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn reduce<R: Reducer>(state_tx: &watch::Sender<R::State>, intent: R::Intent) {
    let current = state_tx.borrow().clone();
    let next = R::reduce(current, intent);
    state_tx.send_if_modified(|state| {
        if *state == next {
            false
        } else {
            *state = next;
            true
        }
    });
}

pub struct Dispatcher<R: Reducer> {
    sender: mpsc::UnboundedSender<StoreCommand<R::Intent, R::State>>,
}

impl<R: Reducer> Clone for Dispatcher<R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<R: Reducer> Dispatcher<R> {
    pub fn dispatch(&self, intent: R::Intent) {
        if self.sender.send(StoreCommand::Dispatch(intent)).is_err() {
            tracing::debug!("Store closed; intent dropped");
        }
    }
}
