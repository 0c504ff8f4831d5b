//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::{Headers, HttpMethod, HttpTransport, Transport};
use crate::types::{shape, validate, Envelope, PostOptions, RequestBody};
use csutl_auth::{NonceSource, RequestSigner, DEFAULT_KEY_VAR, DEFAULT_SECRET_VAR};
use serde_json::Value;
use tracing::{debug, instrument};

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://www.coinspot.com.au";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const NONCE_FIELD: &str = "nonce";

/// CoinSpot REST API client
///
/// Public endpoints are plain GETs. Private endpoints are signed POSTs:
/// credentials are read from the environment on every call, a fresh nonce
/// is added to the JSON body, and the body is signed byte-for-byte as sent.
///
/// # Example
///
/// ```no_run
/// use csutl_rest::{CoinSpotClient, PostOptions};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CoinSpotClient::new()?;
///
/// // Public endpoint
/// let prices = client.get("/pubapi/v2/latest/BTC", false)?;
///
/// // Private endpoint, COINSPOT_API_KEY and COINSPOT_API_SECRET must be set
/// let balances = client.post("/api/v2/ro/my/balances", "{}", PostOptions::default())?;
/// # Ok(())
/// # }
/// ```
pub struct CoinSpotClient<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
    nonces: NonceSource,
}

impl CoinSpotClient<HttpTransport> {
    /// Create a client with the default configuration
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> CoinSpotClient<T> {
    /// Create a client over any transport
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        debug!(base_url = %config.base_url, "Created CoinSpot REST client");

        Self {
            transport,
            config,
            nonces: NonceSource::new(),
        }
    }

    /// Replace the nonce source
    pub fn with_nonce_source(mut self, nonces: NonceSource) -> Self {
        self.nonces = nonces;
        self
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full URL for an API path
    pub fn url(&self, path: &str) -> RestResult<String> {
        if path.trim().is_empty() {
            return Err(RestError::invalid("path", "empty URL provided"));
        }

        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            Ok(format!("{}{}", base, path))
        } else {
            Ok(format!("{}/{}", base, path))
        }
    }

    // ========================================================================
    // Request Pipeline
    // ========================================================================

    /// GET a path and return the response text without validation
    pub(crate) fn fetch(&self, path: &str) -> RestResult<String> {
        let url = self.url(path)?;
        debug!("GET {}", url);
        self.transport.send(HttpMethod::Get, &url, &Headers::new(), None)
    }

    /// GET a public endpoint and return the validated envelope
    pub fn get_envelope(&self, path: &str) -> RestResult<Envelope> {
        validate(&self.fetch(path)?)
    }

    /// GET a public endpoint
    ///
    /// No authentication headers are attached.
    #[instrument(skip(self))]
    pub fn get(&self, path: &str, raw_output: bool) -> RestResult<String> {
        let raw = self.fetch(path)?;
        let envelope = validate(&raw)?;
        Ok(shape(&raw, envelope, raw_output))
    }

    /// POST to a private endpoint
    ///
    /// Unless `options.raw_payload` is set, the body is normalized into a
    /// JSON object and a `nonce` field is added before signing. Missing
    /// credentials fail before anything is sent.
    #[instrument(skip(self, body))]
    pub fn post(
        &self,
        path: &str,
        body: impl Into<RequestBody>,
        options: PostOptions,
    ) -> RestResult<String> {
        let url = self.url(path)?;
        let signer = RequestSigner::from_env(&self.config.key_var, &self.config.secret_var)?;

        let body: RequestBody = body.into();
        let payload = if options.raw_payload {
            body.into_text()
        } else {
            let mut object = body.into_object()?;
            let nonce = self.nonces.next();
            object.insert(NONCE_FIELD.to_string(), Value::String(nonce.to_string()));
            debug!(nonce, "Added nonce to request body");
            Value::Object(object).to_string()
        };

        let mut headers: Headers = signer
            .headers(&payload)
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        debug!("POST {}", url);

        let raw = self
            .transport
            .send(HttpMethod::Post, &url, &headers, Some(&payload))?;
        let envelope = validate(&raw)?;
        Ok(shape(&raw, envelope, options.raw_output))
    }

    // ========================================================================
    // Endpoint Groups
    // ========================================================================

    /// Public market data endpoints
    pub fn market(&self) -> MarketEndpoints<'_, T> {
        MarketEndpoints::new(self)
    }

    /// Private read-only account endpoints
    pub fn account(&self) -> AccountEndpoints<'_, T> {
        AccountEndpoints::new(self)
    }

    /// Private trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_, T> {
        TradingEndpoints::new(self)
    }
}

impl<T> std::fmt::Debug for CoinSpotClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinSpotClient")
            .field("config", &self.config)
            .field("last_nonce", &self.nonces.last())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API host, without a trailing path
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Environment variable holding the API key
    pub key_var: String,
    /// Environment variable holding the API secret
    pub secret_var: String,
    /// Whether endpoint helpers return raw response text
    pub raw_output: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            key_var: DEFAULT_KEY_VAR.to_string(),
            secret_var: DEFAULT_SECRET_VAR.to_string(),
            raw_output: false,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Read credentials from different environment variables
    pub fn with_credential_vars(
        mut self,
        key_var: impl Into<String>,
        secret_var: impl Into<String>,
    ) -> Self {
        self.key_var = key_var.into();
        self.secret_var = secret_var.into();
        self
    }

    /// Return raw response text from endpoint helpers
    pub fn with_raw_output(mut self, raw_output: bool) -> Self {
        self.raw_output = raw_output;
        self
    }
}
