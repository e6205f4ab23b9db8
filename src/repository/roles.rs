use async_trait::async_trait;

use crate::api::dto::RoleDto;
use crate::api::ApiClient;
use crate::outcome::Outcome;
use crate::repository::outcome;

const ROLES: &str = "api/v1/roles";

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn fetch_all(&self) -> Outcome<Vec<RoleDto>>;
    async fn fetch_by_id(&self, id: i64) -> Outcome<RoleDto>;
    async fn fetch_by_name(&self, name: &str) -> Outcome<RoleDto>;
}

pub struct HttpRoleRepository {
    api: ApiClient,
}

impl HttpRoleRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RoleRepository for HttpRoleRepository {
    async fn fetch_all(&self) -> Outcome<Vec<RoleDto>> {
        outcome("roles.fetch_all", self.api.get(ROLES).await)
    }

    async fn fetch_by_id(&self, id: i64) -> Outcome<RoleDto> {
        outcome(
            "roles.fetch_by_id",
            self.api.get(&format!("{}/{}", ROLES, id)).await,
        )
    }

    async fn fetch_by_name(&self, name: &str) -> Outcome<RoleDto> {
        outcome(
            "roles.fetch_by_name",
            self.api.get(&format!("{}/nombre/{}", ROLES, name)).await,
        )
    }
}
