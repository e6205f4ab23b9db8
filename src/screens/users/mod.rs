mod filter;
mod intent;
mod reducer;
mod screen;
mod state;

pub use filter::filter_users;
pub use intent::UsersIntent;
pub use reducer::UsersReducer;
pub use screen::UsersScreen;
pub use state::{UserCriteria, UserStatusFilter, UsersState};
