use serde::Serialize;

/// Prefix carried by every canonical role tag.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Vocabulary offered when the role catalogue cannot be fetched.
pub const DEFAULT_ROLES: [&str; 6] = [
    "ADMINISTRADOR",
    "AUDITOR",
    "COMPRAS",
    "VENTAS",
    "SUPERVISOR",
    "EMPLEADO",
];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Role {
    pub id: i64,
    /// Canonical tag, e.g. `ROLE_ADMINISTRADOR`.
    pub name: String,
}

impl Role {
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// `ROLE_X` stays as is; anything else is upper-cased and prefixed.
pub fn canonical_role(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.starts_with(ROLE_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{}{}", ROLE_PREFIX, trimmed.to_uppercase())
    }
}

/// `ROLE_ADMINISTRADOR` -> `Administrador`.
pub fn display_name(tag: &str) -> String {
    let bare = tag.strip_prefix(ROLE_PREFIX).unwrap_or(tag);
    let mut chars = bare.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Fallback catalogue with synthetic ids, in declaration order.
pub fn default_roles() -> Vec<Role> {
    DEFAULT_ROLES
        .iter()
        .enumerate()
        .map(|(idx, name)| Role {
            id: idx as i64 + 1,
            name: canonical_role(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_role_prefixes_once() {
        assert_eq!(canonical_role("administrador"), "ROLE_ADMINISTRADOR");
        assert_eq!(canonical_role("ROLE_VENTAS"), "ROLE_VENTAS");
        assert_eq!(canonical_role(" compras "), "ROLE_COMPRAS");
    }

    #[test]
    fn display_name_strips_prefix_and_capitalizes() {
        assert_eq!(display_name("ROLE_ADMINISTRADOR"), "Administrador");
        assert_eq!(display_name("AUDITOR"), "Auditor");
        assert_eq!(display_name("ROLE_"), "");
    }

    #[test]
    fn default_roles_are_canonical() {
        let roles = default_roles();
        assert_eq!(roles.len(), 6);
        assert!(roles.iter().all(|r| r.name.starts_with(ROLE_PREFIX)));
        assert_eq!(roles[0].display_name(), "Administrador");
    }
}
