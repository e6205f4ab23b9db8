mod intent;
mod reducer;
mod screen;
mod state;

pub use intent::AuthIntent;
pub use reducer::AuthReducer;
pub use screen::{login_error_message, AuthScreen};
pub use state::AuthState;
