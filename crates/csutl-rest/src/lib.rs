//! REST API client for the CoinSpot cryptocurrency exchange
//!
//! # Features
//!
//! - **Market Data**: Latest prices, bid/ask quotes, price history and statistics
//! - **Account**: Balances, completed orders, open and completed market orders
//! - **Trading**: Market buy and sell orders
//!
//! # Authentication
//!
//! Private endpoints are signed POST requests. Credentials are read from
//! `COINSPOT_API_KEY` and `COINSPOT_API_SECRET` at the time of each call,
//! a strictly increasing `nonce` is added to the JSON body, and the body is
//! signed with HMAC-SHA512.
//!
//! # Responses
//!
//! Every API response carries `status` and `message` fields. Anything other
//! than `"ok"` in both is reported as [`RestError::ApiStatus`]. By default the
//! two fields are stripped from the returned JSON; raw output returns the
//! response text untouched.
//!
//! # Example
//!
//! ```no_run
//! use csutl_rest::CoinSpotClient;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CoinSpotClient::new()?;
//!
//! let stats = client.market().price_history_stats("BTC", 24, None)?;
//! println!("BTC 24h growth: {:.2}%", stats.growth_pct);
//!
//! let balances = client.account().balances(None)?;
//! println!("{}", balances);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CoinSpotClient, DEFAULT_BASE_URL};
pub use error::{ErrorKind, RestError, RestResult};
pub use transport::{Headers, HttpMethod, HttpTransport, Transport};

// Re-export endpoint-specific types
pub use endpoints::{
    AccountEndpoints, AmountType, MarketEndpoints, MarketOrder, OrderQuery, OrderSide,
    TradingEndpoints,
};
pub use types::{shape, validate, Envelope, PostOptions, Quote, RequestBody};

// Re-export statistics types returned by the market endpoints
pub use csutl_stats::{LatestIndices, PricePoint, PriceSeries, PriceStatistics};
