use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Claims of the self-signed assertion a service account exchanges for an
/// OAuth access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountClaims {
    pub iss: String,   // service account email
    pub scope: String, // space separated
    pub aud: String,   // token endpoint
    pub exp: usize,
    pub iat: usize,
}

impl ServiceAccountClaims {
    pub fn new(client_email: &str, scopes: &[&str], token_uri: &str, lifetime_minutes: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(lifetime_minutes);

        Self {
            iss: client_email.to_string(),
            scope: scopes.join(" "),
            aud: token_uri.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}
