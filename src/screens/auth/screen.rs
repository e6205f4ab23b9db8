use std::sync::Arc;

use tokio::sync::watch;

use crate::api::dto::SignupRequest;
use crate::api::{ApiError, ErrorKind};
use crate::config::SecureString;
use crate::model::SessionUser;
use crate::repository::AuthRepository;
use crate::screens::auth::intent::AuthIntent;
use crate::screens::auth::reducer::AuthReducer;
use crate::screens::auth::state::AuthState;
use crate::state::{Store, Submission, TaskScope};
use crate::validation::{validate_new_user, NewUserForm};

/// Sign-in, sign-out and account registration.
pub struct AuthScreen {
    scope: TaskScope,
    inner: Arc<Inner>,
}

struct Inner {
    store: Store<AuthReducer>,
    repo: Arc<dyn AuthRepository>,
}

impl AuthScreen {
    pub fn new(repo: Arc<dyn AuthRepository>) -> Self {
        Self {
            scope: TaskScope::new(),
            inner: Arc::new(Inner {
                store: Store::new(AuthState::default()),
                repo,
            }),
        }
    }

    pub fn state(&self) -> AuthState {
        self.inner.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.store.subscribe()
    }

    /// Authenticated iff a session is stored locally. No network call.
    pub async fn restore(&self) -> AuthState {
        let inner = Arc::clone(&self.inner);
        match self.scope.run(async move { inner.restore().await }).await {
            Some(state) => state,
            None => self.state(),
        }
    }

    pub async fn login(&self, username: &str, password: &SecureString) -> Submission<SessionUser> {
        let username = username.trim().to_string();
        if username.is_empty() || password.is_empty() {
            let message = "Ingresa usuario y contraseña".to_string();
            self.inner.store.apply(AuthIntent::Failed(message)).await;
            return Submission::Invalid;
        }

        let inner = Arc::clone(&self.inner);
        let password = password.clone();
        self.run(async move { inner.login(&username, &password).await })
            .await
    }

    /// Always ends unauthenticated, whatever the server says.
    pub async fn logout(&self) -> AuthState {
        let inner = Arc::clone(&self.inner);
        match self.scope.run(async move { inner.logout().await }).await {
            Some(state) => state,
            None => self.state(),
        }
    }

    pub async fn signup(&self, form: NewUserForm) -> Submission<String> {
        let errors = validate_new_user(&form, &[]);
        if !errors.is_empty() {
            self.inner
                .store
                .apply(AuthIntent::SignupInvalid(errors))
                .await;
            return Submission::Invalid;
        }

        let request = SignupRequest {
            username: form.username.trim().to_lowercase(),
            email: form.email.trim().to_lowercase(),
            password: form.password.expose().to_string(),
            nombre: form.nombre.trim().to_string(),
            apellido: form.apellido.trim().to_string(),
            roles: form.roles.into_iter().collect(),
        };

        let inner = Arc::clone(&self.inner);
        self.run(async move { inner.signup(request).await }).await
    }

    /// Asks the backend whether the stored token is still accepted.
    pub async fn validate_token(&self) -> AuthState {
        let inner = Arc::clone(&self.inner);
        match self.scope.run(async move { inner.validate_token().await }).await {
            Some(state) => state,
            None => self.state(),
        }
    }

    pub fn clear_messages(&self) {
        self.inner.store.dispatch(AuthIntent::MessagesCleared);
    }

    async fn run<T, F>(&self, future: F) -> Submission<T>
    where
        T: Send + 'static,
        F: std::future::Future<Output = Submission<T>> + Send + 'static,
    {
        self.scope
            .run(future)
            .await
            .unwrap_or_else(|| Submission::Failed(ApiError::Incomplete.user_message()))
    }
}

impl Inner {
    async fn restore(&self) -> AuthState {
        let user = self.repo.session().await.map(|s| s.user);
        self.store.apply(AuthIntent::Restored(user)).await
    }

    async fn login(&self, username: &str, password: &SecureString) -> Submission<SessionUser> {
        self.store.dispatch(AuthIntent::Started);
        match self.repo.login(username, password).await.into_result() {
            Ok(session) => {
                self.store
                    .apply(AuthIntent::LoggedIn(session.user.clone()))
                    .await;
                Submission::Accepted(session.user)
            }
            Err(err) => {
                let message = login_error_message(&err);
                self.store.apply(AuthIntent::Failed(message.clone())).await;
                Submission::Failed(message)
            }
        }
    }

    async fn logout(&self) -> AuthState {
        self.store.dispatch(AuthIntent::Started);
        let remote_ok = self.repo.logout().await.is_success();
        self.store.apply(AuthIntent::LoggedOut { remote_ok }).await
    }

    async fn signup(&self, request: SignupRequest) -> Submission<String> {
        self.store.dispatch(AuthIntent::Started);
        match self.repo.signup(&request).await.into_result() {
            Ok(message) => {
                self.store.apply(AuthIntent::SignedUp(message.clone())).await;
                Submission::Accepted(message)
            }
            Err(err) => {
                let message = format!("Error en registro: {}", err.user_message());
                self.store.apply(AuthIntent::Failed(message.clone())).await;
                Submission::Failed(message)
            }
        }
    }

    async fn validate_token(&self) -> AuthState {
        match self.repo.validate_token().await.into_result() {
            Ok(()) => self.restore().await,
            Err(_) => self.store.apply(AuthIntent::TokenRejected).await,
        }
    }
}

/// User-facing text for a failed login, chosen by error kind.
pub fn login_error_message(err: &ApiError) -> String {
    match err.kind() {
        ErrorKind::Http(401) => "Nombre de usuario y/o contraseña incorrecta".to_string(),
        ErrorKind::Http(403) => "Usuario inactivo o sin permisos".to_string(),
        ErrorKind::Http(400) => {
            "Datos inválidos. Por favor verifica tu usuario y contraseña".to_string()
        }
        ErrorKind::Connectivity | ErrorKind::Timeout => {
            "No se pudo conectar al servidor. Verifica tu conexión".to_string()
        }
        _ => err.user_message(),
    }
}
