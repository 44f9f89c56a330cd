use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use super::auth::Credentials;
use super::{MANAGEMENT_BASE, USER_AGENT};

/// Azure Resource Manager client. One instance per command invocation,
/// scoped to a single signed-in identity.
pub struct ArmClient {
    http: reqwest::Client,
    credentials: Credentials,
}

#[derive(Debug, Error)]
pub enum RemoteError {
    /// Error reported by the Resource Manager API, carrying the provider's
    /// own message.
    #[error("{message}")]
    Api { code: String, message: String },
    /// Transport-level failure before a usable response was read.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ArmClient {
    pub fn new(credentials: Credentials) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, credentials })
    }

    /// PUT (create-or-update) an ARM resource.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        api_version: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let url = format!("{MANAGEMENT_BASE}{path}?api-version={api_version}");
        tracing::debug!(%url, "PUT");
        self.send(self.http.put(&url).json(body)).await
    }

    /// GET an ARM resource.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
    ) -> Result<T, RemoteError> {
        let url = format!("{MANAGEMENT_BASE}{path}?api-version={api_version}");
        tracing::debug!(%url, "GET");
        self.send(self.http.get(&url)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = request
            .bearer_auth(self.credentials.token())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        Ok(response.json().await?)
    }
}

/// Map a non-success ARM response to a `RemoteError`, preferring the
/// `{"error": {"code", "message"}}` envelope when the body carries one.
fn api_error(status: StatusCode, body: &str) -> RemoteError {
    #[derive(Deserialize)]
    struct Envelope {
        error: ApiError,
    }

    #[derive(Deserialize)]
    struct ApiError {
        code: String,
        message: String,
    }

    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) => RemoteError::Api {
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => RemoteError::Api {
            code: status.as_str().to_string(),
            message: if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            },
        },
    }
}
