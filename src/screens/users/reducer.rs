use crate::screens::users::filter::filter_users;
use crate::screens::users::intent::UsersIntent;
use crate::screens::users::state::{UserCriteria, UsersState};
use crate::state::{FetchState, OperationState, Reducer};

pub struct UsersReducer;

impl Reducer for UsersReducer {
    type State = UsersState;
    type Intent = UsersIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            UsersIntent::LoadStarted => {
                state.fetch = FetchState::Loading;
                return state;
            }
            UsersIntent::Loaded(items) => {
                state.fetch = FetchState::Loaded;
                state.items = items;
            }
            UsersIntent::LoadFailed(message) => {
                state.fetch = FetchState::Failed(message);
                return state;
            }
            UsersIntent::RolesLoaded(roles) => {
                state.roles = roles;
                return state;
            }
            UsersIntent::QueryTyped(text) => {
                state.query_input = text;
                return state;
            }
            UsersIntent::SearchCommitted(text) => state.criteria.search = text,
            UsersIntent::RoleToggled(role) => {
                if !state.criteria.roles.remove(&role) {
                    state.criteria.roles.insert(role);
                }
            }
            UsersIntent::StatusFilterSelected(status) => state.criteria.status = status,
            UsersIntent::FiltersCleared => {
                state.query_input.clear();
                state.criteria = UserCriteria::default();
            }
            UsersIntent::ValidationFailed(errors) => {
                state.form_errors = errors;
                return state;
            }
            UsersIntent::SubmissionStarted => {
                state.form_errors.clear();
                state.operation = OperationState::Pending;
                return state;
            }
            UsersIntent::Succeeded(message) => {
                state.operation = OperationState::Succeeded(message);
                return state;
            }
            UsersIntent::ActiveChanged { id, active } => {
                let Some(user) = state.items.iter_mut().find(|u| u.id == id) else {
                    return state;
                };
                user.active = active;
                state.operation = OperationState::Succeeded(
                    if active { "Usuario activado" } else { "Usuario desactivado" }.to_string(),
                );
            }
            UsersIntent::Updated(user) => {
                if let Some(slot) = state.items.iter_mut().find(|u| u.id == user.id) {
                    *slot = user;
                }
                state.operation =
                    OperationState::Succeeded("Usuario actualizado exitosamente".to_string());
            }
            UsersIntent::Deleted { id } => {
                state.items.retain(|u| u.id != id);
                state.operation =
                    OperationState::Succeeded("Usuario eliminado exitosamente".to_string());
            }
            UsersIntent::OperationFailed(message) => {
                state.operation = OperationState::Failed(message);
                return state;
            }
            UsersIntent::OperationAcknowledged => {
                state.operation = OperationState::Idle;
                return state;
            }
        }

        state.view = filter_users(&state.items, &state.criteria);
        state
    }
}
