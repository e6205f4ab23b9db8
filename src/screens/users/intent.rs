use crate::model::{Role, User};
use crate::screens::users::state::UserStatusFilter;
use crate::state::Intent;
use crate::validation::{ErrorMap, UserField};

#[derive(Debug, Clone)]
pub enum UsersIntent {
    LoadStarted,
    Loaded(Vec<User>),
    LoadFailed(String),
    RolesLoaded(Vec<Role>),
    QueryTyped(String),
    SearchCommitted(String),
    RoleToggled(String),
    StatusFilterSelected(UserStatusFilter),
    FiltersCleared,
    ValidationFailed(ErrorMap<UserField>),
    SubmissionStarted,
    /// Server confirmed a change that is picked up by the next load.
    Succeeded(String),
    ActiveChanged { id: i64, active: bool },
    Updated(User),
    Deleted { id: i64 },
    OperationFailed(String),
    OperationAcknowledged,
}

impl Intent for UsersIntent {}
