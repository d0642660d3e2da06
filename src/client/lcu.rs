//! HTTPS transport to the local client

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::client::{ClientError, Credentials, LcuResponse, Transport};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client API connection authenticated as `riot:<token>`
pub struct LcuClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl LcuClient {
    pub fn new(credentials: &Credentials) -> Result<Self, ClientError> {
        // The client serves a self-signed certificate on localhost
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: credentials.base_url(),
            auth_header: basic_auth(&credentials.token),
        })
    }
}

fn basic_auth(token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("riot:{}", token)))
}

#[async_trait]
impl Transport for LcuClient {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> LcuResponse {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Authorization", &self.auth_header);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                return LcuResponse::Error {
                    status: None,
                    message: e.to_string(),
                }
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return LcuResponse::NotFound;
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return LcuResponse::Error {
                    status: Some(status.as_u16()),
                    message: e.to_string(),
                }
            }
        };

        if !status.is_success() {
            warn!("{} {} failed with {}", method, path, status);
            return LcuResponse::Error {
                status: Some(status.as_u16()),
                message: text,
            };
        }

        if text.trim().is_empty() {
            return LcuResponse::Success(Value::Null);
        }
        match serde_json::from_str(&text) {
            Ok(value) => LcuResponse::Success(value),
            Err(e) => LcuResponse::Error {
                status: Some(status.as_u16()),
                message: format!("Malformed response body: {}", e),
            },
        }
    }
}
