use crate::model::SessionUser;
use crate::state::UiState;
use crate::validation::{ErrorMap, UserField};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub is_loading: bool,
    /// True iff a session token is stored.
    pub is_authenticated: bool,
    pub user: Option<SessionUser>,
    pub error: Option<String>,
    pub success_message: Option<String>,
    pub signup_errors: ErrorMap<UserField>,
}

impl UiState for AuthState {}
