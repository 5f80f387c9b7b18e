use std::time::Duration;

use serde_json::Value;

use crate::{FailureKind, TransportError};

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Credentials attached to a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    Bearer(String),
    Basic { user: String, password: String },
}

/// Authenticated JSON HTTP used by the adapters and the publisher.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and decode the body as JSON. Non-2xx statuses are errors.
    async fn get_json(
        &self,
        url: &str,
        auth: &Auth,
        query: &[(&str, String)],
    ) -> Result<Value, TransportError>;

    /// POST `body` as JSON and return the status code; the body is not read.
    async fn post_json(&self, url: &str, auth: &Auth, body: &Value) -> Result<u16, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client })
    }
}

fn parse_url(url: &str) -> Result<reqwest::Url, TransportError> {
    reqwest::Url::parse(url).map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn with_auth(request: reqwest::RequestBuilder, auth: &Auth) -> reqwest::RequestBuilder {
    match auth {
        Auth::Bearer(token) => request.bearer_auth(token),
        Auth::Basic { user, password } => request.basic_auth(user, Some(password)),
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn get_json(
        &self,
        url: &str,
        auth: &Auth,
        query: &[(&str, String)],
    ) -> Result<Value, TransportError> {
        let parsed = parse_url(url)?;
        let response = with_auth(self.client.get(parsed), auth)
            .query(query)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response.json::<Value>().await.map_err(map_reqwest_error)
    }

    async fn post_json(&self, url: &str, auth: &Auth, body: &Value) -> Result<u16, TransportError> {
        let parsed = parse_url(url)?;
        let response = with_auth(self.client.post(parsed), auth)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Ok(response.status().as_u16())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransportError::new(FailureKind::Decode, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
