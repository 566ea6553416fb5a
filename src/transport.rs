use reqwest::header::CONTENT_TYPE;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Same keep-alive the game server puts on its own sockets
const TCP_KEEPALIVE: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path and query, relative to the server base URL
    pub path: String,
    /// JSON body
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body of a 2xx response, the matching error otherwise
    pub fn into_body(self) -> Result<String, ClientError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(ClientError::from_status(self.status, self.body))
        }
    }
}

/// Anything that can carry an [`ApiRequest`] to the game server.
///
/// A transport reports what the server said; turning non-2xx statuses into
/// errors is left to the caller.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;
}

/// HTTP transport backed by one long-lived `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().tcp_keepalive(TCP_KEEPALIVE);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("{:?} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Delete => self.http.delete(&url),
        };
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("{:?} {} -> {}", request.method, url, status);

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_body() {
        assert_eq!(ApiResponse::new(204, "").into_body().unwrap(), "");
        assert!(matches!(
            ApiResponse::new(503, "busy").into_body(),
            Err(ClientError::ServiceUnavailable)
        ));
        assert!(matches!(
            ApiResponse::new(404, "gone").into_body(),
            Err(ClientError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let config = ClientConfig::new("http://localhost:5000/");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:5000");
    }
}
