use crate::model::Product;
use crate::screens::inventory::state::StockFilter;
use crate::state::Intent;
use crate::validation::{ErrorMap, ProductField};

#[derive(Debug, Clone)]
pub enum InventoryIntent {
    LoadStarted,
    Loaded(Vec<Product>),
    LoadFailed(String),

    /// Keystroke in the search box; not yet applied to the view.
    QueryTyped(String),
    /// Debounced search value.
    SearchCommitted(String),
    CategorySelected(Option<String>),
    StockFilterSelected(StockFilter),
    FiltersCleared,

    ValidationFailed(ErrorMap<ProductField>),
    SubmissionStarted,
    Created(Product),
    Updated {
        original_code: String,
        product: Product,
    },
    Deleted {
        code: String,
    },
    OperationFailed(String),
    /// The consumer has shown the last operation signal.
    OperationAcknowledged,
}

impl Intent for InventoryIntent {}
