//! Identity gate — redirect-based authorization-code exchange against the
//! Microsoft identity platform, plus the Graph profile fetch that resolves
//! the signed-in user's email.
//!
//! All functionality downstream of login is gated on a successful exchange.
//! A response without an `access_token` is an authentication failure; there
//! is no retry — the user restarts the login flow.

use serde_json::Value;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;

pub mod handlers;

/// The only delegated permission this tool needs: reading the user profile.
pub const SCOPE: &str = "User.Read";

const GRAPH_ME_URL: &str = "https://graph.microsoft.com/v1.0/me";

/// Client for the identity provider. One instance lives in `AppState`.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    authority: String,
    redirect_uri: String,
}

impl IdentityClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.oauth_client_id.clone(),
            client_secret: config.oauth_client_secret.clone(),
            authority: format!(
                "https://login.microsoftonline.com/{}",
                config.oauth_tenant_id
            ),
            redirect_uri: config.oauth_redirect_uri.clone(),
        }
    }

    /// Builds the provider's authorization URL. The session id rides along as
    /// the OAuth `state` parameter so the callback can find its session.
    pub fn authorize_url(&self, session_id: Uuid) -> String {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", SCOPE)
            .append_pair("state", &session_id.to_string())
            .finish();
        format!("{}/oauth2/v2.0/authorize?{}", self.authority, query)
    }

    /// Exchanges an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        let response = self
            .http
            .post(format!("{}/oauth2/v2.0/token", self.authority))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
                ("scope", SCOPE),
            ])
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Token request failed: {e}")))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Token response was not JSON: {e}")))?;

        token_from_response(&body)
    }

    /// Fetches the signed-in user's profile and resolves an email address.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<String, AppError> {
        let response = self
            .http
            .get(GRAPH_ME_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Profile request failed: {e}")))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Profile response was not JSON: {e}")))?;

        Ok(email_from_profile(&body))
    }
}

/// Extracts the access token from a token-endpoint response body.
/// A body without `access_token` is an authentication failure.
fn token_from_response(body: &Value) -> Result<String, AppError> {
    match body.get("access_token").and_then(|v| v.as_str()) {
        Some(token) => Ok(token.to_string()),
        None => {
            let detail = body
                .get("error_description")
                .and_then(|v| v.as_str())
                .unwrap_or("Failed to get token");
            Err(AppError::Auth(detail.to_string()))
        }
    }
}

/// Resolves the user's email: `mail`, falling back to `userPrincipalName`,
/// falling back to the empty string.
fn email_from_profile(body: &Value) -> String {
    body.get("mail")
        .and_then(|v| v.as_str())
        .or_else(|| body.get("userPrincipalName").and_then(|v| v.as_str()))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_from_response_extracts_access_token() {
        let body = json!({"access_token": "abc123", "token_type": "Bearer"});
        assert_eq!(token_from_response(&body).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_access_token_is_auth_error() {
        let body = json!({
            "error": "invalid_grant",
            "error_description": "AADSTS70008: The provided authorization code has expired."
        });
        let err = token_from_response(&body).unwrap_err();
        match err {
            AppError::Auth(msg) => assert!(msg.contains("AADSTS70008")),
            other => panic!("expected Auth error, got {other:?}"),
        }
    }

    #[test]
    fn test_email_prefers_mail_over_principal_name() {
        let body = json!({"mail": "dev@corp.com", "userPrincipalName": "dev@corp.onmicrosoft.com"});
        assert_eq!(email_from_profile(&body), "dev@corp.com");
    }

    #[test]
    fn test_email_falls_back_to_principal_name() {
        let body = json!({"mail": null, "userPrincipalName": "dev@corp.onmicrosoft.com"});
        assert_eq!(email_from_profile(&body), "dev@corp.onmicrosoft.com");
    }

    #[test]
    fn test_email_defaults_to_empty() {
        assert_eq!(email_from_profile(&json!({})), "");
    }

    #[test]
    fn test_authorize_url_carries_scope_and_state() {
        let config = Config {
            database_url: String::new(),
            openai_api_key: String::new(),
            openai_api_endpoint: String::new(),
            openai_api_version: String::new(),
            oauth_client_id: "client-1".to_string(),
            oauth_client_secret: "secret".to_string(),
            oauth_tenant_id: "tenant-1".to_string(),
            oauth_redirect_uri: "http://localhost:8080/auth/callback".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
        };
        let client = IdentityClient::new(&config);
        let session_id = Uuid::new_v4();
        let url = client.authorize_url(session_id);
        assert!(url.starts_with("https://login.microsoftonline.com/tenant-1/oauth2/v2.0/authorize?"));
        assert!(url.contains("scope=User.Read"));
        assert!(url.contains(&format!("state={session_id}")));
    }
}
