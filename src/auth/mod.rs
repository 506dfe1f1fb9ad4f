pub mod claims;
pub mod jwt;
pub mod service_account;

pub use claims::ServiceAccountClaims;
pub use jwt::ServiceAccountSigner;
pub use service_account::{GoogleTokenProvider, ServiceAccountKey, FORMS_BODY_SCOPE};
