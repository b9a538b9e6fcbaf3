/// API client — the single point of entry for all remote calls in the
/// dashboard. Every resource is consumed through the uniform envelope the
/// backend emits: `{ "data": … }` on success, `{ "error": { "code",
/// "message" } }` on failure.
///
/// No mutation is retried here; controllers surface failures as state and
/// leave retrying to the user.
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::collection::{CollectionRoute, CollectionTransport};
use crate::config::Config;
use crate::errors::ApiError;
use crate::models::persona::{Persona, PersonaDraft};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.api_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let mut request = self.client.request(method.clone(), self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(read_error(response).await);
        }
        debug!(%method, path, status = status.as_u16(), "api call succeeded");
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    async fn request_no_content(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let response = self.client.request(method.clone(), self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(read_error(response).await);
        }
        debug!(%method, path, status = status.as_u16(), "api call succeeded");
        Ok(())
    }

    // ── personas ────────────────────────────────────────────────────────────

    pub async fn create_persona(&self, draft: &PersonaDraft) -> Result<Persona, ApiError> {
        let body = serde_json::to_value(draft)?;
        self.request(Method::POST, "/personas", Some(&body)).await
    }

    pub async fn fetch_persona(&self, id: Uuid) -> Result<Persona, ApiError> {
        self.request(Method::GET, &format!("/personas/{id}"), None)
            .await
    }
}

#[async_trait]
impl CollectionTransport for ApiClient {
    async fn fetch_all(&self, route: &CollectionRoute) -> Result<Vec<Value>, ApiError> {
        self.request(Method::GET, &route.path(), None).await
    }

    async fn create(&self, route: &CollectionRoute, body: Value) -> Result<Value, ApiError> {
        self.request(Method::POST, &route.path(), Some(&body)).await
    }

    async fn update(
        &self,
        route: &CollectionRoute,
        id: Uuid,
        body: Value,
    ) -> Result<Value, ApiError> {
        self.request(Method::PATCH, &route.entry_path(id), Some(&body))
            .await
    }

    async fn remove(&self, route: &CollectionRoute, id: Uuid) -> Result<(), ApiError> {
        self.request_no_content(Method::DELETE, &route.entry_path(id))
            .await
    }
}

async fn read_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    parse_error_body(status, &body)
}

/// Parses the backend's error envelope; a body that isn't in envelope shape
/// (proxy output, truncated response) keeps its raw text as the message.
fn parse_error_body(status: u16, body: &str) -> ApiError {
    let (code, message) = serde_json::from_str::<ErrorBody>(body)
        .map(|b| (b.error.code, b.error.message))
        .unwrap_or_else(|_| ("UNKNOWN".to_string(), body.to_string()));
    ApiError::Api {
        status,
        code,
        message,
    }
}
