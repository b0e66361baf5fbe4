//! REST Resource - `ListResource` implementation over the Servfarma HTTP API.
//!
//! # Endpoints
//!
//! For a feature with path `product-groups`:
//!
//! | Operation   | Request                                   |
//! |-------------|-------------------------------------------|
//! | `list`      | `GET {base}/product-groups?page=..&...`   |
//! | `get_by_id` | `GET {base}/product-groups/{id}`          |
//! | `create`    | `POST {base}/product-groups`              |
//! | `update`    | `PUT {base}/product-groups/{id}`          |
//!
//! Bodies travel in snake_case; the feature's [`FieldCodec`] maps them to
//! and from the camelCase shape of the domain records.
//!
//! [`FieldCodec`]: super::FieldCodec

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::time::Duration;

use super::features::RestFeature;
use crate::domain::foundation::EntityId;
use crate::domain::listing::{ListError, Page, PagedQuery};
use crate::ports::ListResource;

/// Connection settings shared by every resource.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// API root, e.g. `https://api.servfarma.com/api/v1`.
    pub base_url: String,
    pub timeout: Duration,
    /// Bearer token sent with every request.
    auth_token: Option<Secret<String>>,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            auth_token: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_auth_token(mut self, token: Secret<String>) -> Self {
        self.auth_token = Some(token);
        self
    }
}

/// HTTP client plus connection settings, cheap to clone.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    config: RestConfig,
}

impl RestClient {
    pub fn new(config: RestConfig) -> Result<Self, ListError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ListError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json");
        match &self.config.auth_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ListError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ListError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                ListError::network(format!("Connection failed: {}", e))
            } else {
                ListError::network(e.to_string())
            }
        })
    }
}

/// Wire envelope of a list response.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(alias = "totalCount", default)]
    total_count: u64,
}

/// `ListResource` backed by one REST collection.
pub struct RestResource<L: RestFeature> {
    api: RestClient,
    _feature: PhantomData<fn() -> L>,
}

impl<L: RestFeature> RestResource<L> {
    pub fn new(api: RestClient) -> Self {
        Self {
            api,
            _feature: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.api.base_url(), L::PATH)
    }

    fn record_url(&self, id: &EntityId) -> String {
        format!("{}/{}/{}", self.api.base_url(), L::PATH, id)
    }

    fn decode_item(&self, raw: Value) -> Result<L::Item, ListError> {
        serde_json::from_value(L::CODEC.decode(raw))
            .map_err(|e| ListError::Decode(format!("{} record: {}", L::NAME, e)))
    }

    fn encode_draft(&self, draft: &L::Draft) -> Result<Value, ListError> {
        let value = serde_json::to_value(draft)
            .map_err(|e| ListError::Decode(format!("{} draft: {}", L::NAME, e)))?;
        Ok(L::CODEC.encode(value))
    }

    async fn read_item(&self, response: Response) -> Result<L::Item, ListError> {
        let raw: Value = response
            .json()
            .await
            .map_err(|e| ListError::Decode(e.to_string()))?;
        self.decode_item(raw)
    }
}

impl<L: RestFeature> Clone for RestResource<L> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

#[async_trait]
impl<L: RestFeature> ListResource<L> for RestResource<L> {
    async fn list(&self, query: &PagedQuery<L::Sort>) -> Result<Page<L::Item>, ListError> {
        let url = self.collection_url();
        tracing::debug!("GET {} page={} size={}", url, query.page, query.page_size);

        let request = self
            .api
            .request(Method::GET, &url)
            .query(&query.to_query_params());
        let response = check_status(self.api.send(request).await?, None).await?;

        let envelope: ListEnvelope = response
            .json()
            .await
            .map_err(|e| ListError::Decode(e.to_string()))?;
        let items = envelope
            .items
            .into_iter()
            .map(|raw| self.decode_item(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, envelope.total_count))
    }

    async fn get_by_id(&self, id: &EntityId) -> Result<L::Item, ListError> {
        let request = self.api.request(Method::GET, &self.record_url(id));
        let response = check_status(self.api.send(request).await?, Some(id)).await?;
        self.read_item(response).await
    }

    async fn create(&self, draft: &L::Draft) -> Result<L::Item, ListError> {
        let body = self.encode_draft(draft)?;
        let request = self
            .api
            .request(Method::POST, &self.collection_url())
            .json(&body);
        let response = check_status(self.api.send(request).await?, None).await?;
        self.read_item(response).await
    }

    async fn update(&self, id: &EntityId, draft: &L::Draft) -> Result<L::Item, ListError> {
        let body = self.encode_draft(draft)?;
        let request = self.api.request(Method::PUT, &self.record_url(id)).json(&body);
        let response = check_status(self.api.send(request).await?, Some(id)).await?;
        self.read_item(response).await
    }
}

/// Maps non-success responses onto `ListError`.
///
/// `record` is the id a 404 refers to, when the request addressed one record.
async fn check_status(response: Response, record: Option<&EntityId>) -> Result<Response, ListError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = record {
            return Err(ListError::NotFound(id.clone()));
        }
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    tracing::warn!("Request failed with {}: {}", status, body);

    match status.as_u16() {
        401 | 403 => Err(ListError::Forbidden(
            message.unwrap_or_else(|| status.to_string()),
        )),
        code @ 500..=599 => match message {
            Some(message) => Err(ListError::rejected(code, message)),
            None => Err(ListError::network(format!("Server error {}", status))),
        },
        code => Err(ListError::rejected(
            code,
            message.unwrap_or_else(|| format!("Unexpected status {}", status)),
        )),
    }
}

/// Extracts the human-readable message of an error payload.
fn error_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| parsed.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
