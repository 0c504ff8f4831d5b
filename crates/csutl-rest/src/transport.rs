//! HTTP transport abstraction
//!
//! The client never talks to the network directly. Every request goes
//! through a [`Transport`], so tests can substitute a recording double.

use crate::client::ClientConfig;
use crate::error::RestResult;
use reqwest::blocking::Client;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Request headers, keyed by header name
pub type Headers = BTreeMap<String, String>;

/// HTTP method used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Performs a single request and returns the response body as text
pub trait Transport {
    /// Send a request
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> RestResult<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> RestResult<String> {
        (**self).send(method, url, headers, body)
    }
}

/// Blocking HTTP transport backed by `reqwest`
///
/// Non-2xx responses are returned as text like any other response; the
/// exchange reports failures in the body's `status`/`message` fields.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport using the timeout and user agent from `config`
    pub fn new(config: &ClientConfig) -> RestResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        Ok(Self { client })
    }
}

const DEFAULT_USER_AGENT: &str = concat!("csutl/", env!("CARGO_PKG_VERSION"));

impl Transport for HttpTransport {
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> RestResult<String> {
        let mut request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        debug!(%method, url, %status, bytes = text.len(), "Received response");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_default_user_agent() {
        assert!(DEFAULT_USER_AGENT.starts_with("csutl/"));
    }

    #[test]
    fn test_transport_builds_from_config() {
        let config = ClientConfig::new().with_timeout(5).with_user_agent("test-agent");
        assert!(HttpTransport::new(&config).is_ok());
    }
}
