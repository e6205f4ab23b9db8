use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::watch;

use crate::config::ScreenConfig;
use crate::mapper::movements_from_dtos;
use crate::model::Movement;
use crate::repository::MovementRepository;
use crate::screens::movements::intent::MovementsIntent;
use crate::screens::movements::reducer::MovementsReducer;
use crate::screens::movements::state::{MovementKpis, MovementTypeFilter, MovementsState};
use crate::state::{Debouncer, Store, TaskScope};

/// Movement history screen with KPIs and filters.
pub struct MovementsScreen {
    scope: TaskScope,
    debouncer: Debouncer<String>,
    inner: Arc<Inner>,
}

struct Inner {
    store: Store<MovementsReducer>,
    repo: Arc<dyn MovementRepository>,
}

impl MovementsScreen {
    pub fn new(repo: Arc<dyn MovementRepository>, config: &ScreenConfig) -> Self {
        let store = Store::new(MovementsState::default());
        let dispatcher = store.dispatcher();
        let debouncer = Debouncer::new(
            Duration::from_millis(config.search_debounce_ms),
            move |query| dispatcher.dispatch(MovementsIntent::SearchCommitted(query)),
        );

        Self {
            scope: TaskScope::new(),
            debouncer,
            inner: Arc::new(Inner { store, repo }),
        }
    }

    pub fn state(&self) -> MovementsState {
        self.inner.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<MovementsState> {
        self.inner.store.subscribe()
    }

    pub async fn settle(&self) -> MovementsState {
        self.inner.store.settle().await
    }

    pub async fn load(&self) -> MovementsState {
        let inner = Arc::clone(&self.inner);
        match self.scope.run(async move { inner.load().await }).await {
            Some(state) => state,
            None => self.state(),
        }
    }

    pub fn retry(&self) {
        let inner = Arc::clone(&self.inner);
        self.scope.spawn(async move {
            inner.load().await;
        });
    }

    pub fn on_query_change(&self, query: &str) {
        self.inner
            .store
            .dispatch(MovementsIntent::QueryTyped(query.to_string()));
        self.debouncer.push(query.to_string());
    }

    pub async fn flush_search(&self) {
        self.debouncer.flush().await;
    }

    pub fn set_type_filter(&self, filter: MovementTypeFilter) {
        self.inner
            .store
            .dispatch(MovementsIntent::TypeFilterSelected(filter));
    }

    pub fn set_date_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.inner
            .store
            .dispatch(MovementsIntent::DateRangeSelected(start, end));
    }

    pub fn clear_filters(&self) {
        self.debouncer.cancel();
        self.inner.store.dispatch(MovementsIntent::FiltersCleared);
    }

    /// Adds a movement the server already confirmed.
    pub fn insert_created(&self, movement: Movement) {
        self.inner.store.dispatch(MovementsIntent::Inserted(movement));
    }

    pub fn movement_by_id(&self, id: i64) -> Option<Movement> {
        self.state().items.into_iter().find(|m| m.id == id)
    }

    pub fn kpis(&self) -> MovementKpis {
        self.state().kpis
    }
}

impl Inner {
    async fn load(&self) -> MovementsState {
        self.store.dispatch(MovementsIntent::LoadStarted);
        match self.repo.fetch_all().await.into_result() {
            Ok(records) => {
                let (items, rejected) = movements_from_dtos(&records);
                if !rejected.is_empty() {
                    tracing::warn!(
                        rejected = rejected.len(),
                        total = records.len(),
                        "Some movement rows were rejected"
                    );
                }
                self.store
                    .apply(MovementsIntent::Loaded {
                        items,
                        rejected_rows: rejected.len(),
                    })
                    .await
            }
            Err(err) => {
                self.store
                    .apply(MovementsIntent::LoadFailed(err.user_message()))
                    .await
            }
        }
    }
}
