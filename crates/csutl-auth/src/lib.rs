//! Authentication primitives for the CoinSpot API
//!
//! Private CoinSpot endpoints expect a JSON body carrying a strictly
//! increasing `nonce`, plus two headers:
//!
//! - `Key`: the API key
//! - `Sign`: hex encoded HMAC-SHA512 of the exact body bytes, keyed by the API secret
//!
//! # Example
//!
//! ```no_run
//! use csutl_auth::{NonceSource, RequestSigner};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let nonces = NonceSource::new();
//! let signer = RequestSigner::from_env("COINSPOT_API_KEY", "COINSPOT_API_SECRET")?;
//!
//! let body = format!(r#"{{"nonce":"{}"}}"#, nonces.next());
//! let headers = signer.headers(&body);
//! assert!(headers.iter().any(|(name, _)| *name == "Sign"));
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod nonce;

pub use credentials::{
    sign, Credentials, RequestSigner, DEFAULT_KEY_VAR, DEFAULT_SECRET_VAR, HEADER_KEY, HEADER_SIGN,
};
pub use error::{AuthError, AuthResult};
pub use nonce::NonceSource;
