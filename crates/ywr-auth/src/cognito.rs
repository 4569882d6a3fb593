//! Cognito user pool client.
//!
//! Calls the unsigned user-pool client operations (InitiateAuth with
//! USER_PASSWORD_AUTH, SignUp, ConfirmSignUp) over plain HTTPS with the
//! x-amz-json-1.1 envelope.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{map_provider_fault, AuthError};
use crate::{AuthTokens, IdentityProvider};

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Cognito user pool client configuration.
#[derive(Debug, Clone)]
pub struct CognitoConfig {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
}

impl CognitoConfig {
    pub fn new(
        region: impl Into<String>,
        user_pool_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            user_pool_id: user_pool_id.into(),
            client_id: client_id.into(),
        }
    }

    /// Regional service endpoint.
    fn endpoint(&self) -> String {
        format!("https://cognito-idp.{}.amazonaws.com/", self.region)
    }
}

/// Identity provider backed by a Cognito user pool.
pub struct CognitoClient {
    config: CognitoConfig,
    http: reqwest::Client,
}

/// Error envelope returned by the service on a fault.
#[derive(Deserialize)]
struct FaultBody {
    #[serde(rename = "__type", default)]
    kind: String,
    // The service is inconsistent about the field casing.
    #[serde(rename = "message", default)]
    message: String,
    #[serde(rename = "Message", default)]
    message_alt: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    #[serde(default)]
    authentication_result: Option<AuthTokens>,
    #[serde(default)]
    challenge_name: Option<String>,
}

impl CognitoClient {
    pub fn new(config: CognitoConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// POST one operation to the service and return the raw response body.
    async fn call(&self, operation: &str, body: serde_json::Value) -> Result<String, AuthError> {
        let response = self
            .http
            .post(self.config.endpoint())
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{operation}"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            debug!(operation, "provider call ok");
            return Ok(text);
        }

        let fault: FaultBody = serde_json::from_str(&text).unwrap_or(FaultBody {
            kind: String::new(),
            message: String::new(),
            message_alt: String::new(),
        });
        let message = if fault.message.is_empty() {
            fault.message_alt
        } else {
            fault.message
        };
        warn!(operation, status = %status, kind = %fault.kind, "provider fault");
        Err(map_provider_fault(&fault.kind, &message))
    }
}

#[async_trait]
impl IdentityProvider for CognitoClient {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthTokens, AuthError> {
        let body = serde_json::json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "ClientId": self.config.client_id,
            "AuthParameters": {
                "USERNAME": username,
                "PASSWORD": password,
            },
        });
        let text = self.call("InitiateAuth", body).await?;

        let parsed: InitiateAuthResponse = serde_json::from_str(&text)
            .map_err(|e| AuthError::Http(format!("malformed auth response: {e}")))?;

        if let Some(challenge) = parsed.challenge_name {
            return Err(AuthError::UnsupportedChallenge(challenge));
        }
        parsed
            .authentication_result
            .ok_or_else(|| AuthError::Http("auth response carried no tokens".into()))
    }

    async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let body = serde_json::json!({
            "ClientId": self.config.client_id,
            "Username": username,
            "Password": password,
            "UserAttributes": [
                { "Name": "email", "Value": username },
            ],
        });
        self.call("SignUp", body).await.map(|_| ())
    }

    async fn confirm(&self, username: &str, code: &str) -> Result<(), AuthError> {
        let body = serde_json::json!({
            "ClientId": self.config.client_id,
            "Username": username,
            "ConfirmationCode": code,
        });
        self.call("ConfirmSignUp", body).await.map(|_| ())
    }
}
