use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{
    auth::service_account::{bearer, GoogleTokenProvider},
    errors::{AppError, AppResult},
    models::forms::{BatchUpdateBody, CreateFormBody, Form, FormInfo, FormRequest, GoogleErrorBody},
    services::form_export_service::FormsApi,
};

/// REST client for `forms.googleapis.com/v1`, authenticated as a service account.
pub struct GoogleFormsClient {
    http: reqwest::Client,
    api_base: String,
    tokens: Arc<GoogleTokenProvider>,
}

impl GoogleFormsClient {
    pub fn new(http: reqwest::Client, api_base: &str, tokens: Arc<GoogleTokenProvider>) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    async fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let token = self.tokens.access_token().await?;
        Ok(self
            .http
            .request(method, format!("{}{}", self.api_base, path))
            .header(AUTHORIZATION, bearer(&token)))
    }

    async fn send<T: DeserializeOwned>(&self, action: &str, request: RequestBuilder) -> AppResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExportError(format!("{} failed: {}", action, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExportError(format!("{} failed: {}", action, e)))?;

        if !status.is_success() {
            log::error!("Forms API {} returned {}: {}", action, status, body);
            return Err(AppError::ExportError(format!(
                "{} failed ({}): {}",
                action,
                status,
                service_message(&body)
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            AppError::ExportError(format!("{} returned an unexpected body: {}", action, e))
        })
    }
}

/// The `error.message` of a Google error envelope, or the raw body.
fn service_message(body: &str) -> String {
    match serde_json::from_str::<GoogleErrorBody>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            if envelope.error.status.is_empty() {
                envelope.error.message
            } else {
                format!("{}: {}", envelope.error.status, envelope.error.message)
            }
        }
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl FormsApi for GoogleFormsClient {
    async fn create_form(&self, info: FormInfo) -> AppResult<Form> {
        let request = self
            .request(Method::POST, "/forms")
            .await?
            .json(&CreateFormBody { info });
        self.send("create form", request).await
    }

    async fn batch_update(&self, form_id: &str, requests: Vec<FormRequest>) -> AppResult<()> {
        let request = self
            .request(Method::POST, &format!("/forms/{}:batchUpdate", form_id))
            .await?
            .json(&BatchUpdateBody { requests });
        let _: serde_json::Value = self.send("batch update", request).await?;
        Ok(())
    }

    async fn get_form(&self, form_id: &str) -> AppResult<Form> {
        let request = self
            .request(Method::GET, &format!("/forms/{}", form_id))
            .await?;
        self.send("get form", request).await
    }
}
