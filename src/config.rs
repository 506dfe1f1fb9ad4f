use std::{env, path::PathBuf};
use secrecy::SecretString;

pub const DEFAULT_AI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_FORMS_API_BASE: &str = "https://forms.googleapis.com/v1";

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub upload_dir: PathBuf,
    pub ai_api_key: SecretString,
    pub ai_api_base: String,
    pub ai_model: String,
    pub google_service_account_file: Option<PathBuf>,
    pub forms_api_base: String,
    pub tesseract_bin: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            ai_api_key: SecretString::from(env::var("GEMINI_API_KEY").unwrap_or_default()),
            ai_api_base: env::var("AI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_AI_API_BASE.to_string()),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
            google_service_account_file: env::var("GOOGLE_SERVICE_ACCOUNT_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            forms_api_base: env::var("FORMS_API_BASE")
                .unwrap_or_else(|_| DEFAULT_FORMS_API_BASE.to_string()),
            tesseract_bin: env::var("TESSERACT_BIN").unwrap_or_else(|_| "tesseract".to_string()),
        }
    }

    /// Refuse to start a production deployment that cannot reach the model.
    /// Panics if the AI key is missing.
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.ai_api_key.expose_secret().trim().is_empty() {
            panic!("FATAL: GEMINI_API_KEY is not set! Set it before running in production.");
        }

        if self.google_service_account_file.is_none() {
            log::warn!("GOOGLE_SERVICE_ACCOUNT_FILE is not set; exports to Google Forms will fail");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            upload_dir: env::temp_dir().join("quizforge-test-uploads"),
            ai_api_key: SecretString::from("test_api_key".to_string()),
            ai_api_base: "http://localhost:9999/v1".to_string(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            google_service_account_file: None,
            forms_api_base: "http://localhost:9998/v1".to_string(),
            tesseract_bin: "tesseract".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.ai_model.is_empty());
        assert!(!config.forms_api_base.is_empty());
        assert!(!config.upload_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.ai_model, "gemini-2.5-flash");
        assert_eq!(config.web_server_port, 8000);
        assert!(config.google_service_account_file.is_none());
    }

    #[test]
    #[should_panic(expected = "GEMINI_API_KEY")]
    fn test_validate_for_production_rejects_missing_key() {
        let mut config = Config::test_config();
        config.ai_api_key = SecretString::from(String::new());
        config.validate_for_production();
    }
}
