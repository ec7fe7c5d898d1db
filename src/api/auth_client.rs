use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::AuthClientConfig;
use crate::error::ClientError;
use crate::models::session_models::{SessionData, SessionResponse};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub products: Vec<String>,
    pub slug: String,
}

impl CheckoutRequest {
    pub fn for_product(product_id: &str, slug: &str) -> Self {
        Self {
            products: vec![product_id.to_string()],
            slug: slug.to_string(),
        }
    }
}

/// Where the browser should go next after a checkout or portal call.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RedirectResponse {
    pub url: String,
}

/// Session, checkout and customer portal calls exposed by the auth server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn get_session(&self) -> Result<SessionResponse, ClientError>;

    async fn checkout(&self, request: &CheckoutRequest) -> Result<RedirectResponse, ClientError>;

    async fn customer_portal(&self) -> Result<RedirectResponse, ClientError>;
}

pub struct HttpAuthClient {
    client: Client,
    base_url: Url,
    cookie: Option<String>,
}

impl HttpAuthClient {
    pub fn new(config: &AuthClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            cookie: None,
        }
    }

    /// Forward the visitor's session cookie on every request.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Malformed(format!("Bad endpoint {}: {}", path, e)))
    }

    fn with_credentials(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.cookie {
            Some(cookie) => request.header(reqwest::header::COOKIE, cookie),
            None => request,
        }
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn get_session(&self) -> Result<SessionResponse, ClientError> {
        let url = self.endpoint("api/auth/get-session")?;
        tracing::debug!("Fetching session from {}", url);
        let response = self.with_credentials(self.client.get(url)).send().await?;
        // the server answers with a bare `null` for anonymous visitors
        let data: Option<SessionData> = Self::read_json(response).await?;
        Ok(SessionResponse { data })
    }

    async fn checkout(&self, request: &CheckoutRequest) -> Result<RedirectResponse, ClientError> {
        let url = self.endpoint("api/auth/checkout")?;
        tracing::debug!("Starting checkout for products {:?}", request.products);
        let response = self
            .with_credentials(self.client.post(url))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn customer_portal(&self) -> Result<RedirectResponse, ClientError> {
        let url = self.endpoint("api/auth/customer/portal")?;
        tracing::debug!("Opening customer portal");
        let response = self.with_credentials(self.client.get(url)).send().await?;
        Self::read_json(response).await
    }
}
