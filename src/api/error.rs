//! Transport error taxonomy for backend calls.
//!
//! Errors are classified structurally at the point they are produced
//! (reqwest error flags or the HTTP status), never by inspecting the
//! rendered message.

use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Could not reach the server (DNS, refused, reset)
    #[error("Connection failed: {0}")]
    Connectivity(String),

    /// Server answered with a non-2xx status
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Success status without the body the operation needs
    #[error("Empty response body")]
    EmptyBody,

    /// Base URL or path could not be joined into a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The operation never produced a final outcome
    #[error("Operation did not complete")]
    Incomplete,

    /// Any other request failure
    #[error("Request failed: {0}")]
    Request(String),
}

/// Coarse error category used to pick user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connectivity,
    Timeout,
    Http(u16),
    Unknown,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Connectivity(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            ApiError::Request(err.to_string())
        }
    }
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Timeout => ErrorKind::Timeout,
            ApiError::Connectivity(_) => ErrorKind::Connectivity,
            ApiError::Status { status, .. } => ErrorKind::Http(*status),
            ApiError::Decode(_)
            | ApiError::EmptyBody
            | ApiError::InvalidUrl(_)
            | ApiError::Incomplete
            | ApiError::Request(_) => ErrorKind::Unknown,
        }
    }

    /// HTTP status when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for a banner or snackbar.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Timeout => {
                "La conexión tardó demasiado. Verifica tu conexión a internet e intenta de nuevo."
                    .to_string()
            }
            ErrorKind::Connectivity => {
                "No se puede alcanzar el servidor. Verifica tu conexión a internet.".to_string()
            }
            ErrorKind::Http(400) => {
                "Datos inválidos. Verifica que todos los campos sean correctos.".to_string()
            }
            ErrorKind::Http(401) => "Sesión no autorizada. Inicia sesión nuevamente.".to_string(),
            ErrorKind::Http(403) => "No tienes permisos para realizar esta acción.".to_string(),
            ErrorKind::Http(404) => "El recurso solicitado no existe.".to_string(),
            ErrorKind::Http(409) => "El registro ya existe en el sistema.".to_string(),
            ErrorKind::Http(500) => {
                "Error en el servidor. Por favor, intenta más tarde.".to_string()
            }
            ErrorKind::Http(503) => {
                "El servidor está en mantenimiento. Por favor, intenta más tarde.".to_string()
            }
            ErrorKind::Http(code) => format!(
                "La operación falló (código {}). Por favor, intenta de nuevo.",
                code
            ),
            ErrorKind::Unknown => {
                "La operación falló. Por favor, intenta de nuevo.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_kind() {
        let err = ApiError::Status {
            status: 409,
            body: "duplicate".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Http(409));
        assert_eq!(err.status(), Some(409));
        assert!(err.user_message().contains("ya existe"));
    }

    #[test]
    fn test_timeout_kind_and_message() {
        let err = ApiError::Timeout;
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(err.status(), None);
        assert!(err.user_message().contains("tardó demasiado"));
    }

    #[test]
    fn test_unlisted_status_gets_generic_message() {
        let err = ApiError::Status {
            status: 418,
            body: String::new(),
        };
        assert!(err.user_message().contains("418"));
    }

    #[test]
    fn test_message_text_does_not_drive_classification() {
        // A decode error mentioning "timeout" is still not a timeout.
        let err = ApiError::Decode("field timeout missing".to_string());
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }
}
