use std::collections::BTreeSet;

use crate::model::{Role, User};
use crate::state::{FetchState, OperationState, UiState};
use crate::validation::{ErrorMap, UserField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserStatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl UserStatusFilter {
    pub fn matches(&self, active: bool) -> bool {
        match self {
            UserStatusFilter::All => true,
            UserStatusFilter::Active => active,
            UserStatusFilter::Inactive => !active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserCriteria {
    /// Matches username, full name or email, case-insensitive.
    pub search: String,
    /// Canonical role tags; a user matches when holding any of them.
    pub roles: BTreeSet<String>,
    pub status: UserStatusFilter,
}

impl UserCriteria {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.roles.is_empty() || self.status != UserStatusFilter::All
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsersState {
    pub fetch: FetchState,
    pub items: Vec<User>,
    /// Role catalogue offered by the filters and forms.
    pub roles: Vec<Role>,
    pub query_input: String,
    pub criteria: UserCriteria,
    pub view: Vec<User>,
    pub operation: OperationState,
    pub form_errors: ErrorMap<UserField>,
}

impl UiState for UsersState {}
