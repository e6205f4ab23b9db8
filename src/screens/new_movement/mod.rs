mod intent;
mod reducer;
mod screen;
mod state;

pub use intent::NewMovementIntent;
pub use reducer::NewMovementReducer;
pub use screen::NewMovementScreen;
pub use state::{NewMovementState, Receipt, ReceiptSource};
