use crate::screens::auth::intent::AuthIntent;
use crate::screens::auth::state::AuthState;
use crate::state::Reducer;

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Intent = AuthIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AuthIntent::Started => {
                state.is_loading = true;
                state.error = None;
            }
            AuthIntent::Restored(user) => {
                state.is_loading = false;
                state.is_authenticated = user.is_some();
                state.user = user;
            }
            AuthIntent::LoggedIn(user) => {
                state.is_loading = false;
                state.is_authenticated = true;
                state.success_message = Some(format!("Bienvenido {}", user.nombre));
                state.user = Some(user);
            }
            AuthIntent::LoggedOut { remote_ok } => {
                state = AuthState {
                    success_message: Some(
                        if remote_ok {
                            "Sesión cerrada correctamente"
                        } else {
                            "Sesión cerrada"
                        }
                        .to_string(),
                    ),
                    ..AuthState::default()
                };
            }
            AuthIntent::SignedUp(message) => {
                state.is_loading = false;
                state.signup_errors.clear();
                state.success_message = Some(message);
            }
            AuthIntent::SignupInvalid(errors) => {
                state.is_loading = false;
                state.signup_errors = errors;
            }
            AuthIntent::TokenRejected => {
                state.is_loading = false;
                state.is_authenticated = false;
                state.error = Some("Token inválido".to_string());
            }
            AuthIntent::Failed(message) => {
                state.is_loading = false;
                state.error = Some(message);
            }
            AuthIntent::MessagesCleared => {
                state.error = None;
                state.success_message = None;
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SessionUser;

    fn user() -> SessionUser {
        SessionUser {
            id: 1,
            username: "admin".into(),
            email: "admin@maestranza.cl".into(),
            nombre: "Ana".into(),
            apellido: "Rojas".into(),
            roles: vec!["ROLE_ADMINISTRADOR".into()],
        }
    }

    #[test]
    fn logout_resets_everything() {
        let state = AuthReducer::reduce(AuthState::default(), AuthIntent::LoggedIn(user()));
        assert!(state.is_authenticated);
        assert_eq!(state.success_message.as_deref(), Some("Bienvenido Ana"));

        let state = AuthReducer::reduce(state, AuthIntent::LoggedOut { remote_ok: false });
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert_eq!(state.success_message.as_deref(), Some("Sesión cerrada"));
    }

    #[test]
    fn failure_keeps_authentication() {
        let state = AuthReducer::reduce(AuthState::default(), AuthIntent::Restored(Some(user())));
        let state = AuthReducer::reduce(state, AuthIntent::Started);
        let state = AuthReducer::reduce(state, AuthIntent::Failed("boom".into()));
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
    }
}
