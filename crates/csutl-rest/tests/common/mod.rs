//! Shared test doubles and fixtures for integration tests

#![allow(dead_code)]

use csutl_rest::{ClientConfig, CoinSpotClient, Headers, HttpMethod, RestError, RestResult, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Successful envelope with a payload field
pub const OK_RESPONSE: &str = r#"{"status":"ok","message":"ok","test":"response"}"#;

/// Latest prices for a single coin
pub const BTC_LATEST_RESPONSE: &str = r#"{
    "status": "ok",
    "message": "ok",
    "prices": {"bid": "99000.50", "ask": "100000.00", "last": "99500.25"}
}"#;

/// Four hourly samples, deliberately out of order
pub const PRICE_HISTORY_RESPONSE: &str =
    "[[1700003600000, 110.0], [1700000000000, 100.0], [1700010800000, 120.0], [1700007200000, 90.0]]";

/// A request seen by the transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Parsed JSON body
    pub fn json_body(&self) -> Value {
        serde_json::from_str(self.body.as_deref().expect("request has no body"))
            .expect("request body is not JSON")
    }

    /// Nonce carried in the body
    pub fn nonce(&self) -> u64 {
        self.json_body()["nonce"]
            .as_str()
            .expect("nonce is not a string")
            .parse()
            .expect("nonce is not numeric")
    }
}

/// Transport that records requests and replays scripted responses
///
/// When the script runs out, every further request gets `fallback`.
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<String>>,
    fallback: String,
}

impl RecordingTransport {
    pub fn new(fallback: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
            fallback: fallback.to_string(),
        }
    }

    pub fn with_responses(responses: &[&str]) -> Self {
        let transport = Self::new(OK_RESPONSE);
        transport
            .responses
            .lock()
            .unwrap()
            .extend(responses.iter().map(|r| r.to_string()));
        transport
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> RestResult<String> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
        });

        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }
}

/// Transport that fails every request
pub struct FailingTransport;

impl Transport for FailingTransport {
    fn send(&self, _: HttpMethod, _: &str, _: &Headers, _: Option<&str>) -> RestResult<String> {
        Err(RestError::Transport("connection refused".to_string()))
    }
}

/// Set credentials under test-specific variable names
///
/// Each test uses its own names so parallel tests never see each other's
/// environment changes.
pub fn config_with_credentials(prefix: &str, key: &str, secret: &str) -> ClientConfig {
    let key_var = format!("{}_API_KEY", prefix);
    let secret_var = format!("{}_API_SECRET", prefix);
    std::env::set_var(&key_var, key);
    std::env::set_var(&secret_var, secret);

    ClientConfig::new()
        .with_base_url("https://coinspot.test")
        .with_credential_vars(key_var, secret_var)
}

/// Client over a recording transport with credentials set
pub fn signed_client(prefix: &str, transport: RecordingTransport) -> CoinSpotClient<RecordingTransport> {
    CoinSpotClient::with_transport(transport, config_with_credentials(prefix, "apikey", "apisecret"))
}
