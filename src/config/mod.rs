mod credentials;
mod loader;
mod types;

pub use credentials::SecureString;
pub use loader::{ConfigError, API_URL_ENV};
pub use types::{ApiConfig, Config, ScreenConfig, SessionConfig};
