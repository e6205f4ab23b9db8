use crate::model::{Movement, MovementType, Product};
use crate::screens::new_movement::state::Receipt;
use crate::state::Intent;
use crate::validation::{ErrorMap, MovementField};

#[derive(Debug, Clone)]
pub enum NewMovementIntent {
    ProductsLoadStarted,
    ProductsLoaded(Vec<Product>),
    ProductsLoadFailed(String),
    TypeSelected(MovementType),
    ProductSelected(i64),
    QuantityChanged(String),
    DescriptionChanged(String),
    ReceiptAttached(Receipt),
    ReceiptCleared,
    ValidationFailed(ErrorMap<MovementField>),
    SubmissionStarted,
    Submitted(Movement),
    SubmissionFailed(String),
    /// Back to an empty form; the product list is kept.
    Reset,
}

impl Intent for NewMovementIntent {}
