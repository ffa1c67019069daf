//! HTTP layer for the control API.
//!
//! `HttpTransport` is the seam that lets tests script backend responses and
//! inspect every outbound request; `ReqwestTransport` is the real one.
//! `ApiClient` is the authenticated request wrapper: it resolves credentials,
//! attaches the Basic header, checks the status and decodes the JSON body.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};

use torpanel_common::models::Credentials;

use crate::auth::CredentialStore;
use crate::Error;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A fully prepared outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body text, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(ApiResponse { status, body })
    }
}

/// Authenticated request client for the control API.
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<CredentialStore>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, transport, credentials }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// `Basic base64(user:pass)`; absent fields encode as empty strings.
    pub fn basic_auth_header(credentials: &Credentials) -> String {
        format!("Basic {}", BASE64.encode(credentials.basic_pair()))
    }

    /// Issues `method path` with an optional JSON body and returns the decoded
    /// JSON response. Any status outside 2xx fails with `Error::Http`.
    pub async fn call(&self, path: &str, method: Method, body: Option<Value>) -> Result<Value, Error> {
        self.call_with_headers(path, method, body, Vec::new()).await
    }

    /// Like [`call`](Self::call), with extra caller headers. A caller header
    /// with the same name replaces the default one.
    pub async fn call_with_headers(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
        extra_headers: Vec<(String, String)>,
    ) -> Result<Value, Error> {
        let credentials = self.credentials.resolve().await;

        let mut headers = vec![(AUTHORIZATION.to_string(), Self::basic_auth_header(&credentials))];
        if body.is_some() {
            headers.push((CONTENT_TYPE.to_string(), "application/json".to_string()));
        }
        for (key, value) in extra_headers {
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&key));
            headers.push((key, value));
        }

        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body,
        };

        debug!("{} {} (Authorization: Basic <redacted>)", method.as_str(), request.url);
        let resp = self.transport.send(request).await?;
        trace!("{} {} => HTTP {} body={}", method.as_str(), path, resp.status, resp.body);

        if !resp.is_success() {
            warn!("{} {} => HTTP {}", method.as_str(), path, resp.status);
            return Err(Error::Http { status: resp.status });
        }

        Ok(serde_json::from_str(&resp.body)?)
    }

    /// [`call`](Self::call) followed by a typed decode.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<T, Error> {
        let value = self.call(path, method, body).await?;
        Ok(serde_json::from_value(value)?)
    }
}
