// ABOUTME: reqwest-backed gateway talking to the TaskFlow HTTP API
// ABOUTME: Translates status codes and error envelopes into GatewayError

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{Gateway, Resource};

/// Header carrying the acting principal
pub const USER_ID_HEADER: &str = "x-user-id";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

/// Gateway for one resource collection behind `{base_url}/{collection}`
#[derive(Clone)]
pub struct HttpGateway<R> {
    http_client: Client,
    base_url: String,
    user_id: Option<String>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpGateway<R> {
    pub fn new(base_url: impl Into<String>) -> GatewayResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self::with_client(http_client, base_url))
    }

    /// Share an existing client between gateways
    pub fn with_client(http_client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: None,
            _resource: PhantomData,
        }
    }

    /// Send `x-user-id` on every request
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    fn collection_url(&self) -> GatewayResult<Url> {
        self.url_with_segments(&[R::COLLECTION])
    }

    /// The id travels as one percent-encoded path segment
    fn item_url(&self, id: &str) -> GatewayResult<Url> {
        self.url_with_segments(&[R::COLLECTION, id])
    }

    fn url_with_segments(&self, segments: &[&str]) -> GatewayResult<Url> {
        let invalid = || GatewayError::Network(format!("Invalid API URL: {}", self.base_url));

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http_client.request(method, url);
        match &self.user_id {
            Some(user_id) => builder.header(USER_ID_HEADER, user_id),
            None => builder,
        }
    }

    /// Pass successful responses through, classify the rest
    async fn check(response: Response) -> GatewayResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.error)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });

        Err(GatewayError::from_status(status, message))
    }
}

#[async_trait]
impl<R: Resource> Gateway<R> for HttpGateway<R> {
    async fn list(&self) -> GatewayResult<Vec<R>> {
        let url = self.collection_url()?;
        debug!("GET {}", url);

        let response = self.request(reqwest::Method::GET, url).send().await?;
        let items = Self::check(response).await?.json::<Vec<R>>().await?;

        Ok(items)
    }

    async fn create(&self, draft: R::Draft) -> GatewayResult<R> {
        let url = self.collection_url()?;
        debug!("POST {}", url);

        let response = self
            .request(reqwest::Method::POST, url)
            .json(&draft)
            .send()
            .await?;

        Ok(Self::check(response).await?.json::<R>().await?)
    }

    async fn update(&self, id: &str, patch: R::Patch) -> GatewayResult<R> {
        let url = self.item_url(id)?;
        debug!("PUT {}", url);

        let response = self
            .request(reqwest::Method::PUT, url)
            .json(&patch)
            .send()
            .await?;

        Ok(Self::check(response).await?.json::<R>().await?)
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        let url = self.item_url(id)?;
        debug!("DELETE {}", url);

        let response = self.request(reqwest::Method::DELETE, url).send().await?;
        Self::check(response).await?;

        Ok(())
    }
}
