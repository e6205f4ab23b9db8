mod filter;
mod intent;
mod reducer;
mod screen;
mod state;

pub use filter::{distinct_categories, filter_products};
pub use intent::InventoryIntent;
pub use reducer::InventoryReducer;
pub use screen::InventoryScreen;
pub use state::{InventoryCriteria, InventoryState, StockFilter, DEFAULT_LOW_STOCK_THRESHOLD};
