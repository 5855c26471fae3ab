//! Client for the hosted authentication service

use caredesk_core::{Error, Result};
use reqwest::Client;
use serde::Deserialize;

/// An authenticated admin session as issued by the hosted auth service
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Authenticated user id
    pub user_id: String,
    /// Authenticated email
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    email: String,
}

/// Client for email/password sign-in against the hosted auth service
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    /// Create a new auth client
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Sign in with email and password
    ///
    /// # Errors
    ///
    /// Returns `Error::Authentication` with the backend's message when the
    /// credentials are rejected, or a backend error when the request fails.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| Error::Backend(format!("Failed to reach auth service: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("error_description")
                        .or_else(|| body.get("msg"))
                        .or_else(|| body.get("message"))
                        .and_then(|m| m.as_str())
                        .map(String::from)
                })
                .unwrap_or_else(|| format!("auth service returned {status}"));
            return Err(Error::Authentication(message));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Backend(format!("Failed to parse auth response: {e}")))?;

        Ok(AuthSession {
            access_token: token.access_token,
            user_id: token.user.id,
            email: token.user.email,
        })
    }

    /// Revoke a session token
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the backend reports a
    /// non-success status.
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| Error::Backend(format!("Failed to reach auth service: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Authentication(format!(
                "sign-out rejected: {}",
                response.status()
            )));
        }

        Ok(())
    }
}
