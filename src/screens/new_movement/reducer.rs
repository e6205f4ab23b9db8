use crate::screens::new_movement::intent::NewMovementIntent;
use crate::screens::new_movement::state::NewMovementState;
use crate::model::MovementType;
use crate::state::{FetchState, OperationState, Reducer};
use crate::validation::{MovementField, MovementForm};

pub struct NewMovementReducer;

impl Reducer for NewMovementReducer {
    type State = NewMovementState;
    type Intent = NewMovementIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            NewMovementIntent::ProductsLoadStarted => state.fetch = FetchState::Loading,
            NewMovementIntent::ProductsLoaded(products) => {
                state.fetch = FetchState::Loaded;
                state.products = products;
                if let Some(id) = state.form.product_id {
                    if !state.products.iter().any(|p| p.id == id) {
                        state.form.product_id = None;
                    }
                }
            }
            NewMovementIntent::ProductsLoadFailed(message) => {
                state.fetch = FetchState::Failed(message);
            }
            NewMovementIntent::TypeSelected(kind) => {
                state.form.kind = Some(kind);
                state.form_errors.remove(&MovementField::Kind);
            }
            NewMovementIntent::ProductSelected(id) => {
                state.form.product_id = Some(id);
                state.form_errors.remove(&MovementField::Product);
            }
            NewMovementIntent::QuantityChanged(text) => {
                state.form.quantity = text;
                state.form_errors.remove(&MovementField::Quantity);
            }
            NewMovementIntent::DescriptionChanged(text) => state.form.description = text,
            NewMovementIntent::ReceiptAttached(receipt) => state.receipt = Some(receipt),
            NewMovementIntent::ReceiptCleared => state.receipt = None,
            NewMovementIntent::ValidationFailed(errors) => state.form_errors = errors,
            NewMovementIntent::SubmissionStarted => {
                state.form_errors.clear();
                state.operation = OperationState::Pending;
            }
            NewMovementIntent::Submitted(movement) => {
                if let Some(product) = state
                    .products
                    .iter_mut()
                    .find(|p| p.id == movement.product.id)
                {
                    product.stock = match movement.kind {
                        MovementType::Entrada => product.stock.saturating_add(movement.quantity),
                        MovementType::Salida => product.stock.saturating_sub(movement.quantity),
                    };
                }
                state.operation = OperationState::Succeeded("Movimiento registrado".to_string());
            }
            NewMovementIntent::SubmissionFailed(message) => {
                state.operation = OperationState::Failed(message);
            }
            NewMovementIntent::Reset => {
                state.form = MovementForm::default();
                state.receipt = None;
                state.form_errors.clear();
                state.operation = OperationState::Idle;
            }
        }
        state
    }
}
