use async_trait::async_trait;

use crate::api::dto::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::api::ApiClient;
use crate::outcome::Outcome;
use crate::repository::outcome;

const USERS: &str = "api/v1/usuarios";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn fetch_all(&self) -> Outcome<Vec<UserDto>>;
    async fn fetch_by_id(&self, id: i64) -> Outcome<UserDto>;
    async fn fetch_by_username(&self, username: &str) -> Outcome<UserDto>;
    /// The backend acknowledges creation without echoing the user.
    async fn create(&self, request: &CreateUserRequest) -> Outcome<()>;
    async fn update(&self, id: i64, request: &UpdateUserRequest) -> Outcome<()>;
    async fn delete(&self, id: i64) -> Outcome<()>;
    async fn activate(&self, id: i64) -> Outcome<()>;
    async fn deactivate(&self, id: i64) -> Outcome<()>;
}

pub struct HttpUserRepository {
    api: ApiClient,
}

impl HttpUserRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn fetch_all(&self) -> Outcome<Vec<UserDto>> {
        tracing::debug!("Fetching users");
        outcome("users.fetch_all", self.api.get(USERS).await)
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<UserDto> {
        outcome(
            "users.fetch_by_id",
            self.api.get(&format!("{}/{}", USERS, id)).await,
        )
    }

    async fn fetch_by_username(&self, username: &str) -> Outcome<UserDto> {
        outcome(
            "users.fetch_by_username",
            self.api
                .get(&format!("{}/username/{}", USERS, username))
                .await,
        )
    }

    async fn create(&self, request: &CreateUserRequest) -> Outcome<()> {
        tracing::debug!(
            username = %request.username,
            roles = ?request.roles,
            "Creating user"
        );
        outcome("users.create", self.api.post_unit(USERS, Some(request)).await)
    }

    async fn update(&self, id: i64, request: &UpdateUserRequest) -> Outcome<()> {
        tracing::debug!(id, "Updating user");
        outcome(
            "users.update",
            self.api
                .patch_unit(&format!("{}/{}", USERS, id), Some(request))
                .await,
        )
    }

    async fn delete(&self, id: i64) -> Outcome<()> {
        tracing::debug!(id, "Deleting user");
        outcome(
            "users.delete",
            self.api.delete(&format!("{}/{}", USERS, id)).await,
        )
    }

    async fn activate(&self, id: i64) -> Outcome<()> {
        outcome(
            "users.activate",
            self.api
                .patch_unit(&format!("{}/{}/activar", USERS, id), None::<&()>)
                .await,
        )
    }

    async fn deactivate(&self, id: i64) -> Outcome<()> {
        outcome(
            "users.deactivate",
            self.api
                .patch_unit(&format!("{}/{}/desactivar", USERS, id), None::<&()>)
                .await,
        )
    }
}
