use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::ExposeSecret;

use crate::{
    auth::{claims::ServiceAccountClaims, service_account::ServiceAccountKey},
    errors::{AppError, AppResult},
};

/// Lifetime Google accepts for a service-account assertion.
const ASSERTION_LIFETIME_MINUTES: i64 = 60;

/// Signs OAuth assertions with a service account's RSA key.
#[derive(Clone)]
pub struct ServiceAccountSigner {
    encoding_key: EncodingKey,
    header: Header,
    client_email: String,
    token_uri: String,
}

impl ServiceAccountSigner {
    pub fn new(key: &ServiceAccountKey) -> AppResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.expose_secret().as_bytes())
            .map_err(|e| {
                AppError::ExportError(format!("Invalid service account private key: {}", e))
            })?;

        let mut header = Header::new(Algorithm::RS256);
        header.kid = key.private_key_id.clone();

        Ok(Self {
            encoding_key,
            header,
            client_email: key.client_email.clone(),
            token_uri: key.token_uri.clone(),
        })
    }

    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    pub fn create_assertion(&self, scopes: &[&str]) -> AppResult<String> {
        let claims = ServiceAccountClaims::new(
            &self.client_email,
            scopes,
            &self.token_uri,
            ASSERTION_LIFETIME_MINUTES,
        );

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::ExportError(format!("Failed to sign assertion: {}", e)))
    }
}
