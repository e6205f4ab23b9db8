use serde::{Deserialize, Serialize};

use crate::config::SecureString;

/// Profile of the signed-in user, persisted next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SecureString,
    pub user: SessionUser,
}
