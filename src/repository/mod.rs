//! One repository per entity family.
//!
//! Each trait is the seam the screens depend on; the `Http*` types are the
//! production implementations over [`ApiClient`](crate::api::ApiClient).
//! Every completed call yields `Outcome::Success` or `Outcome::Error`.

mod auth;
mod inventory;
mod movements;
mod roles;
mod users;

pub use auth::{AuthRepository, HttpAuthRepository};
pub use inventory::{HttpInventoryRepository, InventoryRepository};
pub use movements::{HttpMovementRepository, MovementQuery, MovementRepository};
pub use roles::{HttpRoleRepository, RoleRepository};
pub use users::{HttpUserRepository, UserRepository};

use crate::api::ApiError;
use crate::outcome::Outcome;

/// Log a failed call at the repository boundary and wrap it.
fn outcome<T>(operation: &'static str, result: Result<T, ApiError>) -> Outcome<T> {
    match result {
        Ok(value) => Outcome::Success(value),
        Err(err) => {
            tracing::warn!(operation, error = %err, "Repository call failed");
            Outcome::Error(err)
        }
    }
}
