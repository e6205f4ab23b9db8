use crate::model::{MovementType, Product};
use crate::state::{FetchState, OperationState, UiState};
use crate::validation::{ErrorMap, MovementField, MovementForm};

/// Where an attached receipt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptSource {
    Gallery,
    Camera,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub path: String,
    pub source: ReceiptSource,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewMovementState {
    /// Products offered in the selector.
    pub fetch: FetchState,
    pub products: Vec<Product>,
    pub form: MovementForm,
    pub receipt: Option<Receipt>,
    pub form_errors: ErrorMap<MovementField>,
    pub operation: OperationState,
}

impl UiState for NewMovementState {}

impl NewMovementState {
    pub fn selected_product(&self) -> Option<&Product> {
        self.form
            .product_id
            .and_then(|id| self.products.iter().find(|p| p.id == id))
    }

    pub fn selected_type(&self) -> Option<MovementType> {
        self.form.kind
    }
}
