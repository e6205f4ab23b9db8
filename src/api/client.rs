use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::timeout;

use crate::api::error::ApiError;
use crate::config::{ApiConfig, SecureString};

/// Thin JSON client over the backend REST API.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted
/// and the token receiver observes the same session store.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    request_timeout: Duration,
    token: watch::Receiver<Option<SecureString>>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        token: watch::Receiver<Option<SecureString>>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .build()
            .map_err(|e| ApiError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            request_timeout: Duration::from_secs(config.timeout_seconds as u64),
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path, &[])?;
        let bytes = self.send(self.client.request(Method::GET, url)).await?;
        json_body(bytes)
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path, query)?;
        let bytes = self.send(self.client.request(Method::GET, url)).await?;
        json_body(bytes)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        let bytes = self
            .send(self.client.request(Method::POST, url).json(body))
            .await?;
        json_body(bytes)
    }

    /// POST whose success response carries no body the caller needs.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let url = self.url(path, &[])?;
        let mut builder = self.client.request(Method::POST, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        let bytes = self
            .send(self.client.request(Method::PUT, url).json(body))
            .await?;
        json_body(bytes)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        let bytes = self
            .send(self.client.request(Method::PATCH, url).json(body))
            .await?;
        json_body(bytes)
    }

    /// PATCH whose success response carries no body the caller needs.
    pub async fn patch_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let url = self.url(path, &[])?;
        let mut builder = self.client.request(Method::PATCH, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await?;
        Ok(())
    }

    /// PATCH with query parameters and no request body.
    pub async fn patch_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path, query)?;
        let bytes = self.send(self.client.request(Method::PATCH, url)).await?;
        json_body(bytes)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path, &[])?;
        self.send(self.client.request(Method::DELETE, url)).await?;
        Ok(())
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Runs the whole exchange, body included, under the request timeout.
    async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let builder = match self.token.borrow().as_ref() {
            Some(token) if !token.is_empty() => {
                builder.header(AUTHORIZATION, format!("Bearer {}", token.expose()))
            }
            _ => builder,
        };

        match timeout(self.request_timeout, exchange(builder)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout),
        }
    }
}

async fn exchange(builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
    let response = builder.send().await?;
    let status = response.status();
    tracing::debug!(
        status = status.as_u16(),
        url = %response.url(),
        "Backend response"
    );

    if status.is_success() {
        Ok(response.bytes().await?.to_vec())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn json_body<T: DeserializeOwned>(bytes: Vec<u8>) -> Result<T, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::EmptyBody);
    }
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
