use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::{
    auth::jwt::ServiceAccountSigner,
    errors::{AppError, AppResult},
};

pub const FORMS_BODY_SCOPE: &str = "https://www.googleapis.com/auth/forms.body";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// A token is refreshed this long before Google would expire it.
const EXPIRY_MARGIN_SECONDS: i64 = 60;

/// The fields of a Google service-account JSON key file that signing needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: SecretString,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub async fn from_file(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::ExportError(format!(
                "Failed to read service account file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            AppError::ExportError(format!(
                "Invalid service account file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

struct CachedToken {
    token: SecretString,
    expires_at: DateTime<Utc>,
}

/// Exchanges signed service-account assertions for OAuth access tokens and
/// reuses each token until shortly before it expires.
pub struct GoogleTokenProvider {
    http: reqwest::Client,
    key_path: Option<PathBuf>,
    scopes: Vec<&'static str>,
    cached: RwLock<Option<CachedToken>>,
}

impl GoogleTokenProvider {
    pub fn new(http: reqwest::Client, key_path: Option<PathBuf>, scopes: Vec<&'static str>) -> Self {
        Self {
            http,
            key_path,
            scopes,
            cached: RwLock::new(None),
        }
    }

    pub async fn access_token(&self) -> AppResult<SecretString> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.expires_at > Utc::now() {
                return Ok(cached.token.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let token = fresh.token.clone();
        *self.cached.write().await = Some(fresh);
        Ok(token)
    }

    async fn fetch_token(&self) -> AppResult<CachedToken> {
        let key_path = self.key_path.as_deref().ok_or_else(|| {
            AppError::ExportError("GOOGLE_SERVICE_ACCOUNT_FILE is not configured".to_string())
        })?;

        let key = ServiceAccountKey::from_file(key_path).await?;
        let signer = ServiceAccountSigner::new(&key)?;
        let assertion = signer.create_assertion(&self.scopes)?;

        log::info!("Requesting Google access token for {}", key.client_email);

        let response = self
            .http
            .post(signer.token_uri())
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AppError::ExportError(format!("Token request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExportError(format!("Failed to read token response: {}", e)))?;

        if !status.is_success() {
            log::error!("Google token exchange failed with {}: {}", status, body);
            return Err(AppError::ExportError(format!(
                "Token exchange failed ({}): {}",
                status, body
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::ExportError(format!("Invalid token response: {}", e)))?;

        Ok(CachedToken {
            token: SecretString::from(parsed.access_token),
            expires_at: Utc::now() + Duration::seconds(parsed.expires_in - EXPIRY_MARGIN_SECONDS),
        })
    }
}

impl std::fmt::Debug for GoogleTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTokenProvider")
            .field("key_path", &self.key_path)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Bearer header value for a token.
pub fn bearer(token: &SecretString) -> String {
    format!("Bearer {}", token.expose_secret())
}
