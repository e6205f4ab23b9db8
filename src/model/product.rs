use serde::Serialize;

/// Category label used when the backend sends no category.
pub const DEFAULT_CATEGORY: &str = "Sin categoría";

/// An inventory item as the screens see it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Backend id, used to address update and delete calls.
    pub id: i64,
    /// Business key, `^[A-Z]{4}-\d{3}$`.
    pub code: String,
    pub name: String,
    pub category: String,
    pub category_id: Option<i64>,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Stock band of a product relative to the low-stock threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Out,
    Low,
    Healthy,
}

impl Product {
    pub fn stock_level(&self, low_threshold: u32) -> StockLevel {
        match self.stock {
            0 => StockLevel::Out,
            n if n <= low_threshold => StockLevel::Low,
            _ => StockLevel::Healthy,
        }
    }
}
