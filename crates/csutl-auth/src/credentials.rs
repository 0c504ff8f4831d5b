//! API credentials and HMAC-SHA512 request signing
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;
use tracing::debug;

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// Environment variable holding the API key
pub const DEFAULT_KEY_VAR: &str = "COINSPOT_API_KEY";

/// Environment variable holding the API secret
pub const DEFAULT_SECRET_VAR: &str = "COINSPOT_API_SECRET";

/// Header carrying the API key
pub const HEADER_KEY: &str = "Key";

/// Header carrying the body signature
pub const HEADER_SIGN: &str = "Sign";

/// Compute the CoinSpot signature for a request body
///
/// HMAC-SHA512 keyed by `secret` over the exact bytes of `body`,
/// lower-case hex encoded.
pub fn sign(secret: &str, body: &str) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// API credentials for authenticated requests
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// API secret (zeroized on drop)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Read credentials from the named environment variables
    ///
    /// A variable that is unset or empty is reported as
    /// [`AuthError::EnvVarNotSet`].
    pub fn from_env(key_var: &str, secret_var: &str) -> AuthResult<Self> {
        let api_key = read_var(key_var)?;
        let api_secret = read_var(secret_var)?;

        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a request body with this secret
    pub fn sign(&self, body: &str) -> String {
        sign(self.api_secret.expose_secret(), body)
    }
}

fn read_var(name: &str) -> AuthResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AuthError::EnvVarNotSet(name.to_string())),
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self::new(self.api_key.clone(), self.api_secret.expose_secret())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", prefix))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Produces the authentication headers for a POST body
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Create a signer for the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Create a signer from the named environment variables
    ///
    /// Called once per signed request so that rotated credentials are
    /// picked up without restarting.
    pub fn from_env(key_var: &str, secret_var: &str) -> AuthResult<Self> {
        Credentials::from_env(key_var, secret_var).map(Self::new)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the body that will be transmitted
    pub fn sign(&self, body: &str) -> String {
        self.credentials.sign(body)
    }

    /// `Key` and `Sign` headers for this body
    pub fn headers(&self, body: &str) -> Vec<(&'static str, String)> {
        debug!(body_len = body.len(), "Signing request body");
        vec![
            (HEADER_KEY, self.api_key().to_string()),
            (HEADER_SIGN, self.sign(body)),
        ]
    }
}
