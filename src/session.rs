//! Local persistence of the signed-in session.
//!
//! The token is published on a `watch` channel so the API client picks up
//! login and logout without being rebuilt.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

use crate::config::SecureString;
use crate::model::{Session, SessionUser};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reactive view of the current token.
    fn token(&self) -> watch::Receiver<Option<SecureString>>;

    async fn load(&self) -> Result<Option<Session>, SessionError>;

    async fn save(&self, session: &Session) -> Result<(), SessionError>;

    async fn clear(&self) -> Result<(), SessionError>;
}

/// Session kept only for the life of the process.
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
    token_tx: watch::Sender<Option<SecureString>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        let (token_tx, _) = watch::channel(None);
        Self {
            session: Mutex::new(None),
            token_tx,
        }
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.token_tx.send_replace(Some(session.token.clone()));
        *store.session.lock() = Some(session);
        store
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    fn token(&self) -> watch::Receiver<Option<SecureString>> {
        self.token_tx.subscribe()
    }

    async fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.session.lock().clone())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.session.lock() = Some(session.clone());
        self.token_tx.send_replace(Some(session.token.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.session.lock() = None;
        self.token_tx.send_replace(None);
        Ok(())
    }
}

/// On-disk shape. The token is only exposed here, at the storage boundary.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
    user: SessionUser,
}

/// JSON session file, replaced atomically on every save.
pub struct FileSessionStore {
    path: PathBuf,
    token_tx: watch::Sender<Option<SecureString>>,
}

impl FileSessionStore {
    /// Opens the store and seeds the token channel from an existing file.
    ///
    /// A missing file means no session; a corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let initial = read_session(&path)?.map(|s| s.token);
        let (token_tx, _) = watch::channel(initial);
        Ok(Self { path, token_tx })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    fn token(&self) -> watch::Receiver<Option<SecureString>> {
        self.token_tx.subscribe()
    }

    async fn load(&self) -> Result<Option<Session>, SessionError> {
        let path = self.path.clone();
        match tokio::fs::read(&path).await {
            Ok(bytes) => decode(&path, &bytes).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SessionError::Io { path, source }),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        let stored = StoredSession {
            token: session.token.expose().to_string(),
            user: session.user.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&stored)?;

        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let tmp = self
            .path
            .with_extension(format!("json.{}.tmp", uuid::Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, &bytes).await.map_err(io_err)?;
        if let Err(source) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_err(source));
        }

        self.token_tx.send_replace(Some(session.token.clone()));
        tracing::info!(username = %session.user.username, "Session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.token_tx.send_replace(None);
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

fn read_session(path: &Path) -> Result<Option<Session>, SessionError> {
    match std::fs::read(path) {
        Ok(bytes) => decode(path, &bytes).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SessionError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn decode(path: &Path, bytes: &[u8]) -> Result<Session, SessionError> {
    let stored: StoredSession =
        serde_json::from_slice(bytes).map_err(|source| SessionError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Session {
        token: SecureString::new(stored.token),
        user: stored.user,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(token: &str) -> Session {
        Session {
            token: SecureString::new(token),
            user: SessionUser {
                id: 1,
                username: "admin".into(),
                email: "admin@maestranza.cl".into(),
                nombre: "Ana".into(),
                apellido: "Rojas".into(),
                roles: vec!["ROLE_ADMINISTRADOR".into()],
            },
        }
    }

    #[tokio::test]
    async fn test_memory_store_publishes_token() {
        let store = MemorySessionStore::new();
        let rx = store.token();
        assert!(rx.borrow().is_none());

        store.save(&session("abc")).await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|t| t.expose().to_string()), Some("abc".into()));

        store.clear().await.unwrap();
        assert!(rx.borrow().is_none());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        assert!(store.load().await.unwrap().is_none());

        store.save(&session("tok-1")).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.token.expose(), "tok-1");
        assert_eq!(loaded.user.username, "admin");

        // A second store over the same file starts with the saved token.
        let reopened = FileSessionStore::open(&path).unwrap();
        assert!(reopened.token().borrow().is_some());

        store.clear().await.unwrap();
        assert!(!path.exists());
        assert!(store.token().borrow().is_none());
        // Clearing twice is fine.
        store.clear().await.unwrap();
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FileSessionStore::open(&path),
            Err(SessionError::Corrupt { .. })
        ));
    }
}
