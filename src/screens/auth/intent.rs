use crate::model::SessionUser;
use crate::state::Intent;
use crate::validation::{ErrorMap, UserField};

#[derive(Debug, Clone)]
pub enum AuthIntent {
    Started,
    Restored(Option<SessionUser>),
    LoggedIn(SessionUser),
    LoggedOut { remote_ok: bool },
    SignedUp(String),
    SignupInvalid(ErrorMap<UserField>),
    TokenRejected,
    Failed(String),
    MessagesCleared,
}

impl Intent for AuthIntent {}
