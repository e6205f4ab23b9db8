use std::sync::Arc;

use async_trait::async_trait;

use crate::api::dto::{JwtResponse, LoginRequest, MessageResponse, SignupRequest};
use crate::api::{ApiClient, ApiError};
use crate::config::SecureString;
use crate::mapper::session_from_jwt;
use crate::model::Session;
use crate::outcome::Outcome;
use crate::repository::outcome;
use crate::session::SessionStore;

const AUTH: &str = "api/auth";

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Authenticates and persists the session on success.
    async fn login(&self, username: &str, password: &SecureString) -> Outcome<Session>;

    /// Always clears the local session and always succeeds.
    async fn logout(&self) -> Outcome<()>;

    /// Registers an account; yields the server's confirmation message.
    async fn signup(&self, request: &SignupRequest) -> Outcome<String>;

    async fn verify(&self) -> Outcome<()>;

    async fn validate_token(&self) -> Outcome<()>;

    /// Locally stored session, if any.
    async fn session(&self) -> Option<Session>;
}

pub struct HttpAuthRepository {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
}

impl HttpAuthRepository {
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn login(&self, username: &str, password: &SecureString) -> Outcome<Session> {
        tracing::debug!(username, "Logging in");
        let request = LoginRequest {
            username: username.to_string(),
            password: password.expose().to_string(),
        };
        let jwt: JwtResponse = match self
            .api
            .post(&format!("{}/login", AUTH), &request)
            .await
        {
            Ok(jwt) => jwt,
            Err(err) => return outcome("auth.login", Err(err)),
        };

        let session = session_from_jwt(&jwt);
        if let Err(err) = self.store.save(&session).await {
            tracing::warn!(error = %err, "Failed to persist session");
            return Outcome::Error(ApiError::Request(format!(
                "No se pudo guardar la sesión: {}",
                err
            )));
        }
        tracing::info!(username = %session.user.username, "Logged in");
        Outcome::Success(session)
    }

    async fn logout(&self) -> Outcome<()> {
        if let Err(err) = self
            .api
            .post_unit(&format!("{}/logout", AUTH), None::<&()>)
            .await
        {
            tracing::warn!(error = %err, "Remote logout failed; clearing local session anyway");
        }
        if let Err(err) = self.store.clear().await {
            tracing::warn!(error = %err, "Failed to clear local session");
        }
        tracing::info!("Logged out");
        Outcome::Success(())
    }

    async fn signup(&self, request: &SignupRequest) -> Outcome<String> {
        tracing::debug!(username = %request.username, "Signing up");
        outcome(
            "auth.signup",
            self.api
                .post::<_, MessageResponse>(&format!("{}/registro", AUTH), request)
                .await
                .map(|r| r.message),
        )
    }

    async fn verify(&self) -> Outcome<()> {
        outcome(
            "auth.verify",
            self.api
                .get::<serde_json::Value>(&format!("{}/verify", AUTH))
                .await
                .map(|_| ()),
        )
    }

    async fn validate_token(&self) -> Outcome<()> {
        outcome(
            "auth.validate_token",
            self.api
                .get::<serde_json::Value>(&format!("{}/validate-token", AUTH))
                .await
                .map(|_| ()),
        )
    }

    async fn session(&self) -> Option<Session> {
        match self.store.load().await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read stored session");
                None
            }
        }
    }
}
