use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::{MANAGEMENT_BASE, USER_AGENT};

const LOGIN_BASE: &str = "https://login.microsoftonline.com";
const SUBSCRIPTIONS_API_VERSION: &str = "2022-12-01";

/// Public client id of the Azure CLI, usable by any first-party tool for
/// the device-code grant.
const CLIENT_ID: &str = "04b07795-8ddb-461a-bbee-02f9e1bf7b46";
const SCOPE: &str = "https://management.azure.com/.default";

/// Opaque bearer token issued by the identity provider.
pub struct Credentials {
    access_token: String,
}

impl Credentials {
    pub(crate) fn token(&self) -> &str {
        &self.access_token
    }

    #[cfg(test)]
    pub(crate) fn for_tests(token: &str) -> Self {
        Self {
            access_token: token.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    #[serde(rename = "subscriptionId")]
    pub subscription_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

/// Result of one interactive login: a token plus the subscriptions it can
/// see, in the order the provider returned them.
pub struct AuthContext {
    pub credentials: Credentials,
    pub subscriptions: Vec<Subscription>,
}

impl AuthContext {
    pub fn first_subscription(&self) -> Option<&Subscription> {
        self.subscriptions.first()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("interactive login was declined")]
    Declined,
    #[error("the device code expired before sign-in completed")]
    Expired,
    #[error("identity provider error: {0}")]
    Protocol(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    #[serde(default = "default_interval")]
    interval: u64,
    #[serde(default)]
    message: Option<String>,
}

fn default_interval() -> u64 {
    5
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Tenant segment of the login authority. An empty or absent tenant id
/// falls back to the multi-tenant `organizations` endpoint.
fn authority(tenant_id: Option<&str>) -> &str {
    match tenant_id {
        Some(tenant) if !tenant.is_empty() => tenant,
        _ => "organizations",
    }
}

/// Perform a fresh interactive device-code login and list the subscriptions
/// visible to the signed-in identity. Nothing is cached between runs.
pub async fn interactive_login(tenant_id: Option<&str>) -> Result<AuthContext, AuthError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()?;

    let tenant = authority(tenant_id);
    let device = request_device_code(&client, tenant).await?;

    match &device.message {
        Some(message) => eprintln!("    {message}"),
        None => eprintln!(
            "    To sign in, open {} in a browser and enter the code {}",
            device.verification_uri, device.user_code
        ),
    }

    let access_token = poll_for_token(&client, tenant, &device).await?;
    tracing::debug!("token issued, listing subscriptions");

    let credentials = Credentials { access_token };
    let subscriptions = list_subscriptions(&client, &credentials).await?;

    Ok(AuthContext {
        credentials,
        subscriptions,
    })
}

async fn request_device_code(
    client: &reqwest::Client,
    tenant: &str,
) -> Result<DeviceCodeResponse, AuthError> {
    let response = client
        .post(format!("{LOGIN_BASE}/{tenant}/oauth2/v2.0/devicecode"))
        .form(&[("client_id", CLIENT_ID), ("scope", SCOPE)])
        .send()
        .await?;

    if !response.status().is_success() {
        let error: OAuthErrorResponse = response.json().await?;
        return Err(AuthError::Protocol(describe(&error)));
    }

    Ok(response.json().await?)
}

async fn poll_for_token(
    client: &reqwest::Client,
    tenant: &str,
    device: &DeviceCodeResponse,
) -> Result<String, AuthError> {
    let url = format!("{LOGIN_BASE}/{tenant}/oauth2/v2.0/token");
    let mut interval = Duration::from_secs(device.interval);

    loop {
        tokio::time::sleep(interval).await;

        let response = client
            .post(&url)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:device_code"),
                ("client_id", CLIENT_ID),
                ("device_code", device.device_code.as_str()),
            ])
            .send()
            .await?;

        if response.status().is_success() {
            let token: TokenResponse = response.json().await?;
            return Ok(token.access_token);
        }

        let error: OAuthErrorResponse = response.json().await?;
        match error.error.as_str() {
            "authorization_pending" => continue,
            "slow_down" => interval += Duration::from_secs(5),
            "authorization_declined" => return Err(AuthError::Declined),
            "expired_token" => return Err(AuthError::Expired),
            _ => return Err(AuthError::Protocol(describe(&error))),
        }
    }
}

async fn list_subscriptions(
    client: &reqwest::Client,
    credentials: &Credentials,
) -> Result<Vec<Subscription>, AuthError> {
    #[derive(Deserialize)]
    struct SubscriptionList {
        value: Vec<Subscription>,
    }

    let response = client
        .get(format!(
            "{MANAGEMENT_BASE}/subscriptions?api-version={SUBSCRIPTIONS_API_VERSION}"
        ))
        .bearer_auth(credentials.token())
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::Protocol(format!(
            "subscription listing failed with {status}: {}",
            body.trim()
        )));
    }

    let list: SubscriptionList = response.json().await?;
    Ok(list.value)
}

fn describe(error: &OAuthErrorResponse) -> String {
    match &error.error_description {
        Some(description) => description.clone(),
        None => error.error.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_uses_tenant_when_present() {
        assert_eq!(authority(Some("contoso.onmicrosoft.com")), "contoso.onmicrosoft.com");
    }

    #[test]
    fn authority_falls_back_for_empty_tenant() {
        assert_eq!(authority(Some("")), "organizations");
        assert_eq!(authority(None), "organizations");
    }

    #[test]
    fn parse_device_code_response() {
        let json = r#"{
            "device_code": "dc-123",
            "user_code": "ABCD-1234",
            "verification_uri": "https://microsoft.com/devicelogin",
            "expires_in": 900,
            "interval": 5,
            "message": "To sign in, use a web browser..."
        }"#;
        let device: DeviceCodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(device.user_code, "ABCD-1234");
        assert_eq!(device.interval, 5);
    }

    #[test]
    fn device_code_interval_defaults() {
        let json = r#"{
            "device_code": "dc",
            "user_code": "uc",
            "verification_uri": "https://microsoft.com/devicelogin"
        }"#;
        let device: DeviceCodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(device.interval, 5);
        assert!(device.message.is_none());
    }

    #[test]
    fn parse_oauth_error() {
        let json = r#"{"error": "expired_token", "error_description": "AADSTS70020: expired"}"#;
        let error: OAuthErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(error.error, "expired_token");
        assert_eq!(describe(&error), "AADSTS70020: expired");
    }

    #[test]
    fn describe_falls_back_to_error_code() {
        let error = OAuthErrorResponse {
            error: "invalid_client".to_string(),
            error_description: None,
        };
        assert_eq!(describe(&error), "invalid_client");
    }

    #[test]
    fn parse_subscription() {
        let json = r#"{"subscriptionId": "sub-1", "displayName": "Pay-As-You-Go"}"#;
        let subscription: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(subscription.subscription_id, "sub-1");
        assert_eq!(subscription.display_name.as_deref(), Some("Pay-As-You-Go"));
    }

    #[test]
    fn first_subscription_of_empty_context() {
        let context = AuthContext {
            credentials: Credentials {
                access_token: "t".to_string(),
            },
            subscriptions: Vec::new(),
        };
        assert!(context.first_subscription().is_none());
    }
}
