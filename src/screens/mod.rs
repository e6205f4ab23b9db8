//! Screen controllers.
//!
//! Each screen owns one [`Store`](crate::state::Store) and the repositories it
//! talks to. Screens do not share state; a change made on one screen shows up
//! on another only after that screen reloads.

pub mod auth;
pub mod inventory;
pub mod movements;
pub mod new_movement;
pub mod users;

pub use auth::AuthScreen;
pub use inventory::InventoryScreen;
pub use movements::MovementsScreen;
pub use new_movement::NewMovementScreen;
pub use users::UsersScreen;
