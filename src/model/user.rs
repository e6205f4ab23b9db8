use std::collections::BTreeSet;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub active: bool,
    /// Canonical role tags (`ROLE_*`).
    pub roles: BTreeSet<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_string()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}
