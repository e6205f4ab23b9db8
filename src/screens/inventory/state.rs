use crate::model::Product;
use crate::state::{FetchState, OperationState, UiState};
use crate::validation::{ErrorMap, ProductField};

/// Default stock at or below which a product counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    /// Stock above the low-stock threshold.
    InStock,
    /// Stock between 1 and the threshold, inclusive.
    LowStock,
    OutOfStock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryCriteria {
    /// Committed search text; matches name or code, case-insensitive.
    pub search: String,
    pub category: Option<String>,
    pub stock: StockFilter,
    pub low_stock_threshold: u32,
}

impl Default for InventoryCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            stock: StockFilter::All,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl InventoryCriteria {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category.is_some() || self.stock != StockFilter::All
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryState {
    pub fetch: FetchState,
    /// Last confirmed snapshot of the product list.
    pub items: Vec<Product>,
    /// Raw text of the search box, before debouncing.
    pub query_input: String,
    pub criteria: InventoryCriteria,
    /// `items` filtered by `criteria`, in `items` order.
    pub view: Vec<Product>,
    pub operation: OperationState,
    pub form_errors: ErrorMap<ProductField>,
}

impl UiState for InventoryState {}

impl InventoryState {
    pub fn with_threshold(low_stock_threshold: u32) -> Self {
        Self {
            criteria: InventoryCriteria {
                low_stock_threshold,
                ..InventoryCriteria::default()
            },
            ..Self::default()
        }
    }
}
