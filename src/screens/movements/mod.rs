mod filter;
mod intent;
mod reducer;
mod screen;
mod state;

pub use filter::{filter_movements, kpis, sort_newest_first};
pub use intent::MovementsIntent;
pub use reducer::MovementsReducer;
pub use screen::MovementsScreen;
pub use state::{MovementCriteria, MovementKpis, MovementTypeFilter, MovementsState};
