use crate::screens::inventory::filter::filter_products;
use crate::screens::inventory::intent::InventoryIntent;
use crate::screens::inventory::state::{InventoryCriteria, InventoryState};
use crate::state::{FetchState, OperationState, Reducer};
use crate::validation::ErrorMap;

pub struct InventoryReducer;

impl Reducer for InventoryReducer {
    type State = InventoryState;
    type Intent = InventoryIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            InventoryIntent::LoadStarted => {
                state.fetch = FetchState::Loading;
                return state;
            }
            InventoryIntent::Loaded(items) => {
                state.fetch = FetchState::Loaded;
                state.items = items;
            }
            InventoryIntent::LoadFailed(message) => {
                state.fetch = FetchState::Failed(message);
                return state;
            }
            InventoryIntent::QueryTyped(text) => {
                state.query_input = text;
                return state;
            }
            InventoryIntent::SearchCommitted(text) => {
                state.criteria.search = text;
            }
            InventoryIntent::CategorySelected(category) => {
                state.criteria.category = category;
            }
            InventoryIntent::StockFilterSelected(filter) => {
                state.criteria.stock = filter;
            }
            InventoryIntent::FiltersCleared => {
                state.query_input.clear();
                state.criteria = InventoryCriteria {
                    low_stock_threshold: state.criteria.low_stock_threshold,
                    ..InventoryCriteria::default()
                };
            }
            InventoryIntent::ValidationFailed(errors) => {
                state.form_errors = errors;
                state.operation = OperationState::Idle;
                return state;
            }
            InventoryIntent::SubmissionStarted => {
                state.form_errors = ErrorMap::new();
                state.operation = OperationState::Pending;
                return state;
            }
            InventoryIntent::Created(product) => {
                state.items.push(product);
                state.operation =
                    OperationState::Succeeded("Producto creado exitosamente".to_string());
            }
            InventoryIntent::Updated {
                original_code,
                product,
            } => {
                if let Some(slot) = state.items.iter_mut().find(|p| p.code == original_code) {
                    *slot = product;
                }
                state.operation =
                    OperationState::Succeeded("Producto actualizado exitosamente".to_string());
            }
            InventoryIntent::Deleted { code } => {
                state.items.retain(|p| p.code != code);
                state.operation =
                    OperationState::Succeeded("Producto eliminado exitosamente".to_string());
            }
            InventoryIntent::OperationFailed(message) => {
                state.operation = OperationState::Failed(message);
                return state;
            }
            InventoryIntent::OperationAcknowledged => {
                state.operation = OperationState::Idle;
                return state;
            }
        }

        state.view = filter_products(&state.items, &state.criteria);
        state
    }
}
