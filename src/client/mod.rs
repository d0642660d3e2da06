//! Local Game Client Integration
//!
//! Talks to the game client's local HTTPS API to read champion select and to
//! push rune pages and item sets. All requests go through [`Transport`], so
//! the watcher and export logic can be driven by an in-memory double.

pub mod credentials;
pub mod export;
pub mod lcu;
pub mod session;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use credentials::Credentials;
pub use lcu::LcuClient;

/// Errors raised by client integration
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not connected to the game client")]
    NotConnected,

    #[error("Client credentials not found: {0}")]
    CredentialsNotFound(String),

    #[error("Could not parse client credentials from: {0}")]
    CredentialsUnparseable(String),

    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid rune configuration: expected {expected} runes, got {actual}")]
    InvalidRunePage { expected: usize, actual: usize },

    #[error("Unexpected payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one client request
#[derive(Debug, Clone, PartialEq)]
pub enum LcuResponse {
    /// 2xx with the parsed body (`Null` when empty)
    Success(Value),
    /// 404, e.g. not currently in champion select
    NotFound,
    /// Any other failure, with the status when one was received
    Error { status: Option<u16>, message: String },
}

impl LcuResponse {
    /// Body of a success; `None` for not-found; error otherwise
    pub fn into_optional(self) -> Result<Option<Value>, ClientError> {
        match self {
            LcuResponse::Success(value) => Ok(Some(value)),
            LcuResponse::NotFound => Ok(None),
            LcuResponse::Error { status: Some(status), message } => Err(ClientError::Http { status, message }),
            LcuResponse::Error { status: None, message } => Err(ClientError::Transport(message)),
        }
    }

    /// Body of a success; not-found is an error here
    pub fn into_value(self) -> Result<Value, ClientError> {
        self.into_optional()?.ok_or(ClientError::Http {
            status: 404,
            message: "Not found".to_string(),
        })
    }

    /// Deserialize a success body
    pub fn parse<T: DeserializeOwned>(self) -> Result<Option<T>, ClientError> {
        match self.into_optional()? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}

/// Request/response access to the local client
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> LcuResponse;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport for tests

    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// A recorded request
    #[derive(Debug, Clone, PartialEq)]
    pub struct Call {
        pub method: Method,
        pub path: String,
        pub body: Option<Value>,
    }

    /// Replays canned responses by method and path; unknown routes are 404
    #[derive(Default)]
    pub struct FakeTransport {
        routes: Mutex<HashMap<(Method, String), LcuResponse>>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(self, method: Method, path: &str, response: LcuResponse) -> Self {
            self.routes.lock().insert((method, path.to_string()), response);
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        pub fn calls_to(&self, method: &Method, prefix: &str) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|c| &c.method == method && c.path.starts_with(prefix))
                .collect()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn request(&self, method: Method, path: &str, body: Option<Value>) -> LcuResponse {
            self.calls.lock().push(Call {
                method: method.clone(),
                path: path.to_string(),
                body,
            });
            self.routes
                .lock()
                .get(&(method, path.to_string()))
                .cloned()
                .unwrap_or(LcuResponse::NotFound)
        }
    }

    pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Runtime::new().unwrap().block_on(future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_is_not_an_error() {
        assert_eq!(LcuResponse::NotFound.into_optional().unwrap(), None);
        assert!(LcuResponse::NotFound.into_value().is_err());
    }

    #[test]
    fn test_error_keeps_status() {
        let err = LcuResponse::Error {
            status: Some(500),
            message: "boom".to_string(),
        }
        .into_optional()
        .unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 500, .. }));

        let err = LcuResponse::Error {
            status: None,
            message: "refused".to_string(),
        }
        .into_optional()
        .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_parse_success() {
        #[derive(serde::Deserialize)]
        struct Page {
            id: u64,
        }
        let page: Option<Page> = LcuResponse::Success(json!({ "id": 7 })).parse().unwrap();
        assert_eq!(page.map(|p| p.id), Some(7));
    }
}
