use std::sync::Arc;

use tokio::sync::watch;

use crate::api::dto::CreateMovementRequest;
use crate::api::ApiError;
use crate::mapper::{movement_from_dto, product_from_dto};
use crate::model::{Movement, MovementType};
use crate::repository::{InventoryRepository, MovementRepository};
use crate::screens::new_movement::intent::NewMovementIntent;
use crate::screens::new_movement::reducer::NewMovementReducer;
use crate::screens::new_movement::state::{NewMovementState, Receipt, ReceiptSource};
use crate::state::{InFlight, Store, Submission, TaskScope};
use crate::validation::{validate_movement, ValidatedMovement};

const SUBMIT_KEY: &str = "movement:new";

/// Form for registering a stock entry or exit.
///
/// The receipt is kept locally and attached to the confirmed movement; the
/// backend does not receive it.
pub struct NewMovementScreen {
    scope: TaskScope,
    inner: Arc<Inner>,
}

struct Inner {
    store: Store<NewMovementReducer>,
    products: Arc<dyn InventoryRepository>,
    movements: Arc<dyn MovementRepository>,
    in_flight: Arc<InFlight>,
}

impl NewMovementScreen {
    pub fn new(
        products: Arc<dyn InventoryRepository>,
        movements: Arc<dyn MovementRepository>,
    ) -> Self {
        Self {
            scope: TaskScope::new(),
            inner: Arc::new(Inner {
                store: Store::new(NewMovementState::default()),
                products,
                movements,
                in_flight: InFlight::new(),
            }),
        }
    }

    pub fn state(&self) -> NewMovementState {
        self.inner.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<NewMovementState> {
        self.inner.store.subscribe()
    }

    pub async fn settle(&self) -> NewMovementState {
        self.inner.store.settle().await
    }

    /// Fetches the selectable products; inactive ones are left out.
    pub async fn load_products(&self) -> NewMovementState {
        let inner = Arc::clone(&self.inner);
        match self.scope.run(async move { inner.load_products().await }).await {
            Some(state) => state,
            None => self.state(),
        }
    }

    pub fn select_type(&self, kind: MovementType) {
        self.inner.store.dispatch(NewMovementIntent::TypeSelected(kind));
    }

    pub fn select_product(&self, product_id: i64) {
        self.inner
            .store
            .dispatch(NewMovementIntent::ProductSelected(product_id));
    }

    pub fn set_quantity(&self, text: &str) {
        self.inner
            .store
            .dispatch(NewMovementIntent::QuantityChanged(text.to_string()));
    }

    pub fn set_description(&self, text: &str) {
        self.inner
            .store
            .dispatch(NewMovementIntent::DescriptionChanged(text.to_string()));
    }

    pub fn attach_receipt(&self, path: impl Into<String>, source: ReceiptSource) {
        self.inner
            .store
            .dispatch(NewMovementIntent::ReceiptAttached(Receipt {
                path: path.into(),
                source,
            }));
    }

    pub fn clear_receipt(&self) {
        self.inner.store.dispatch(NewMovementIntent::ReceiptCleared);
    }

    pub fn reset(&self) {
        self.inner.store.dispatch(NewMovementIntent::Reset);
    }

    /// Validates against the loaded products and creates the movement.
    ///
    /// Only one submission runs at a time.
    pub async fn submit(&self) -> Submission<Movement> {
        let snapshot = self.settle().await;
        let validated = match validate_movement(&snapshot.form, &snapshot.products) {
            Ok(validated) => validated,
            Err(errors) => {
                self.inner
                    .store
                    .apply(NewMovementIntent::ValidationFailed(errors))
                    .await;
                return Submission::Invalid;
            }
        };

        let Some(guard) = self.inner.in_flight.try_acquire(SUBMIT_KEY) else {
            return Submission::Busy;
        };

        let receipt = snapshot.receipt.map(|r| r.path);
        let inner = Arc::clone(&self.inner);
        self.scope
            .run(async move {
                let _guard = guard;
                inner.submit(validated, receipt).await
            })
            .await
            .unwrap_or_else(|| Submission::Failed(ApiError::Incomplete.user_message()))
    }
}

impl Inner {
    async fn load_products(&self) -> NewMovementState {
        self.store.dispatch(NewMovementIntent::ProductsLoadStarted);
        match self.products.fetch_all().await.into_result() {
            Ok(records) => {
                let products = records
                    .iter()
                    .filter(|dto| dto.activo)
                    .map(product_from_dto)
                    .collect();
                self.store
                    .apply(NewMovementIntent::ProductsLoaded(products))
                    .await
            }
            Err(err) => {
                self.store
                    .apply(NewMovementIntent::ProductsLoadFailed(err.user_message()))
                    .await
            }
        }
    }

    async fn submit(
        &self,
        validated: ValidatedMovement,
        receipt: Option<String>,
    ) -> Submission<Movement> {
        self.store.dispatch(NewMovementIntent::SubmissionStarted);

        let request = CreateMovementRequest {
            producto_id: validated.product_id,
            cantidad: i64::from(validated.quantity),
            tipo: validated.kind.as_wire().to_string(),
            descripcion: validated.description,
        };

        let created = match self.movements.create(&request).await.into_result() {
            Ok(created) => created,
            Err(err) => {
                return self
                    .fail(format!("Error al crear el movimiento: {}", err.user_message()))
                    .await
            }
        };

        match movement_from_dto(&created) {
            Ok(mut movement) => {
                if movement.receipt_path.is_none() {
                    movement.receipt_path = receipt;
                }
                self.store
                    .apply(NewMovementIntent::Submitted(movement.clone()))
                    .await;
                Submission::Accepted(movement)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Created movement could not be read back");
                self.fail(ApiError::Decode(err.to_string()).user_message())
                    .await
            }
        }
    }

    async fn fail<T>(&self, message: String) -> Submission<T> {
        self.store
            .apply(NewMovementIntent::SubmissionFailed(message.clone()))
            .await;
        Submission::Failed(message)
    }
}
