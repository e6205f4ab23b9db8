use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::api::dto::ProductDto;
use crate::api::ApiError;
use crate::config::ScreenConfig;
use crate::mapper::{product_from_dto, product_to_dto};
use crate::model::{Product, DEFAULT_CATEGORY};
use crate::repository::InventoryRepository;
use crate::screens::inventory::filter::distinct_categories;
use crate::screens::inventory::intent::InventoryIntent;
use crate::screens::inventory::reducer::InventoryReducer;
use crate::screens::inventory::state::{InventoryState, StockFilter};
use crate::state::{Debouncer, InFlight, Store, Submission, TaskScope};
use crate::validation::{validate_product, ProductForm, ValidatedProduct};

/// Inventory list screen: load, filter, create, edit, delete products.
pub struct InventoryScreen {
    scope: TaskScope,
    debouncer: Debouncer<String>,
    inner: Arc<Inner>,
}

struct Inner {
    store: Store<InventoryReducer>,
    repo: Arc<dyn InventoryRepository>,
    /// Wire records by code; update payloads are built on top of them.
    records: Mutex<HashMap<String, ProductDto>>,
    in_flight: Arc<InFlight>,
}

impl InventoryScreen {
    pub fn new(repo: Arc<dyn InventoryRepository>, config: &ScreenConfig) -> Self {
        let store = Store::new(InventoryState::with_threshold(config.low_stock_threshold));
        let dispatcher = store.dispatcher();
        let debouncer = Debouncer::new(
            Duration::from_millis(config.search_debounce_ms),
            move |query| dispatcher.dispatch(InventoryIntent::SearchCommitted(query)),
        );

        Self {
            scope: TaskScope::new(),
            debouncer,
            inner: Arc::new(Inner {
                store,
                repo,
                records: Mutex::new(HashMap::new()),
                in_flight: InFlight::new(),
            }),
        }
    }

    pub fn state(&self) -> InventoryState {
        self.inner.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<InventoryState> {
        self.inner.store.subscribe()
    }

    /// Waits until every intent dispatched so far has been reduced.
    pub async fn settle(&self) -> InventoryState {
        self.inner.store.settle().await
    }

    /// Fetches the product list and waits for the result.
    pub async fn load(&self) -> InventoryState {
        let inner = Arc::clone(&self.inner);
        match self.scope.run(async move { inner.load().await }).await {
            Some(state) => state,
            None => self.state(),
        }
    }

    /// Re-fetch in the background after a failure.
    pub fn retry(&self) {
        let inner = Arc::clone(&self.inner);
        self.scope.spawn(async move {
            inner.load().await;
        });
    }

    pub fn on_query_change(&self, query: &str) {
        self.inner
            .store
            .dispatch(InventoryIntent::QueryTyped(query.to_string()));
        self.debouncer.push(query.to_string());
    }

    /// Applies the pending search text now instead of waiting out the window.
    pub async fn flush_search(&self) {
        self.debouncer.flush().await;
    }

    pub fn select_category(&self, category: Option<String>) {
        self.inner
            .store
            .dispatch(InventoryIntent::CategorySelected(category));
    }

    pub fn set_stock_filter(&self, filter: StockFilter) {
        self.inner
            .store
            .dispatch(InventoryIntent::StockFilterSelected(filter));
    }

    pub fn clear_filters(&self) {
        self.debouncer.cancel();
        self.inner.store.dispatch(InventoryIntent::FiltersCleared);
    }

    pub fn acknowledge(&self) {
        self.inner
            .store
            .dispatch(InventoryIntent::OperationAcknowledged);
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.state().items)
    }

    pub fn product_by_code(&self, code: &str) -> Option<Product> {
        self.state().items.into_iter().find(|p| p.code == code)
    }

    pub async fn create_product(&self, form: ProductForm) -> Submission<Product> {
        let snapshot = self.state();
        let validated = match validate_product(&form, &snapshot.items, None) {
            Ok(validated) => validated,
            Err(errors) => {
                self.inner
                    .store
                    .apply(InventoryIntent::ValidationFailed(errors))
                    .await;
                return Submission::Invalid;
            }
        };

        let Some(guard) = self
            .inner
            .in_flight
            .try_acquire(product_key(&validated.code))
        else {
            return Submission::Busy;
        };

        let inner = Arc::clone(&self.inner);
        self.run(async move {
            let _guard = guard;
            inner.create(validated).await
        })
        .await
    }

    /// Edits the product currently stored under `original_code`.
    pub async fn update_product(&self, original_code: &str, form: ProductForm) -> Submission<Product> {
        let snapshot = self.state();
        let validated = match validate_product(&form, &snapshot.items, Some(original_code)) {
            Ok(validated) => validated,
            Err(errors) => {
                self.inner
                    .store
                    .apply(InventoryIntent::ValidationFailed(errors))
                    .await;
                return Submission::Invalid;
            }
        };

        let Some(guard) = self.inner.in_flight.try_acquire(product_key(original_code)) else {
            return Submission::Busy;
        };

        let inner = Arc::clone(&self.inner);
        let original_code = original_code.to_string();
        self.run(async move {
            let _guard = guard;
            inner.update(original_code, validated).await
        })
        .await
    }

    pub async fn delete_product(&self, code: &str) -> Submission<()> {
        let Some(guard) = self.inner.in_flight.try_acquire(product_key(code)) else {
            return Submission::Busy;
        };

        let inner = Arc::clone(&self.inner);
        let code = code.to_string();
        self.run(async move {
            let _guard = guard;
            inner.delete(code).await
        })
        .await
    }

    async fn run<T, F>(&self, future: F) -> Submission<T>
    where
        T: Send + 'static,
        F: std::future::Future<Output = Submission<T>> + Send + 'static,
    {
        self.scope
            .run(future)
            .await
            .unwrap_or_else(|| Submission::Failed(ApiError::Incomplete.user_message()))
    }
}

impl Inner {
    async fn load(&self) -> InventoryState {
        self.store.dispatch(InventoryIntent::LoadStarted);
        match self.repo.fetch_all().await.into_result() {
            Ok(records) => {
                let products = records.iter().map(product_from_dto).collect();
                *self.records.lock() = records
                    .into_iter()
                    .map(|dto| (dto.codigo.clone(), dto))
                    .collect();
                self.store.apply(InventoryIntent::Loaded(products)).await
            }
            Err(err) => {
                self.store
                    .apply(InventoryIntent::LoadFailed(err.user_message()))
                    .await
            }
        }
    }

    async fn create(&self, validated: ValidatedProduct) -> Submission<Product> {
        self.store.dispatch(InventoryIntent::SubmissionStarted);

        let category_id = self.resolve_category(&validated.category).await;
        let draft = Product {
            id: 0,
            code: validated.code,
            name: validated.name,
            category: validated.category,
            category_id,
            description: validated.description,
            price: validated.price,
            stock: validated.stock,
            active: true,
        };
        let payload = product_to_dto(&draft, None);

        match self.repo.create(&payload).await.into_result() {
            Ok(created) => {
                let product = confirmed(&created, &draft.category);
                self.records
                    .lock()
                    .insert(created.codigo.clone(), created);
                self.store
                    .apply(InventoryIntent::Created(product.clone()))
                    .await;
                Submission::Accepted(product)
            }
            Err(err) => self.fail("Error al agregar", err).await,
        }
    }

    async fn update(&self, original_code: String, validated: ValidatedProduct) -> Submission<Product> {
        self.store.dispatch(InventoryIntent::SubmissionStarted);

        let base = self.records.lock().get(&original_code).cloned();
        let Some(base) = base else {
            return self.fail_with("Producto no encontrado".to_string()).await;
        };

        let current_category = base.categoria.as_ref().map(|c| c.nombre.as_str());
        let category_id = if current_category == Some(validated.category.as_str()) {
            base.categoria_id.or_else(|| base.categoria.as_ref().map(|c| c.id))
        } else {
            self.resolve_category(&validated.category).await
        };

        let edited = Product {
            id: base.id,
            code: validated.code,
            name: validated.name,
            category: validated.category,
            category_id,
            description: validated.description,
            price: validated.price,
            stock: validated.stock,
            active: base.activo,
        };
        let payload = product_to_dto(&edited, Some(&base));

        match self.repo.update(base.id, &payload).await.into_result() {
            Ok(updated) => {
                let product = confirmed(&updated, &edited.category);
                {
                    let mut records = self.records.lock();
                    records.remove(&original_code);
                    records.insert(updated.codigo.clone(), updated);
                }
                self.store
                    .apply(InventoryIntent::Updated {
                        original_code,
                        product: product.clone(),
                    })
                    .await;
                Submission::Accepted(product)
            }
            Err(err) => self.fail("Error al actualizar", err).await,
        }
    }

    async fn delete(&self, code: String) -> Submission<()> {
        self.store.dispatch(InventoryIntent::SubmissionStarted);

        let id = self
            .records
            .lock()
            .get(&code)
            .map(|dto| dto.id)
            .or_else(|| {
                self.store
                    .snapshot()
                    .items
                    .iter()
                    .find(|p| p.code == code)
                    .map(|p| p.id)
            });
        let Some(id) = id else {
            return self.fail_with("Producto no encontrado".to_string()).await;
        };

        match self.repo.delete(id).await.into_result() {
            Ok(()) => {
                self.records.lock().remove(&code);
                self.store.apply(InventoryIntent::Deleted { code }).await;
                Submission::Accepted(())
            }
            Err(err) => self.fail("Error al eliminar", err).await,
        }
    }

    /// Category id by name, case-insensitive. Unknown names stay unlinked.
    async fn resolve_category(&self, name: &str) -> Option<i64> {
        match self.repo.categories().await.into_result() {
            Ok(categories) => categories
                .iter()
                .find(|c| c.nombre.eq_ignore_ascii_case(name))
                .map(|c| c.id),
            Err(err) => {
                tracing::warn!(error = %err, category = name, "Could not resolve category");
                None
            }
        }
    }

    async fn fail<T>(&self, prefix: &str, err: ApiError) -> Submission<T> {
        self.fail_with(format!("{}: {}", prefix, err.user_message()))
            .await
    }

    async fn fail_with<T>(&self, message: String) -> Submission<T> {
        self.store
            .apply(InventoryIntent::OperationFailed(message.clone()))
            .await;
        Submission::Failed(message)
    }
}

fn product_key(code: &str) -> String {
    format!("product:{}", code)
}

/// Server echo, keeping the typed category when the echo omits it.
fn confirmed(dto: &ProductDto, typed_category: &str) -> Product {
    let mut product = product_from_dto(dto);
    if dto.categoria.is_none() && product.category == DEFAULT_CATEGORY {
        product.category = typed_category.to_string();
    }
    product
}
