//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use super::require_coin;
use crate::client::CoinSpotClient;
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::{validate, Quote};
use chrono::{Duration, Utc};
use csutl_stats::{summarize, PricePoint, PriceSeries, PriceStatistics};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Latest prices for all coins
pub const LATEST_PATH: &str = "/pubapi/v2/latest";

/// Price history chart data
pub const PRICE_HISTORY_PATH: &str = "/charts/history_basic";

/// Public market data endpoints
pub struct MarketEndpoints<'a, T> {
    client: &'a CoinSpotClient<T>,
}

impl<'a, T: Transport> MarketEndpoints<'a, T> {
    pub fn new(client: &'a CoinSpotClient<T>) -> Self {
        Self { client }
    }

    /// Get latest prices, for every coin or a single one
    #[instrument(skip(self))]
    pub fn latest_prices(&self, coin: Option<&str>) -> RestResult<String> {
        let path = match coin {
            Some(coin) => format!("{}/{}", LATEST_PATH, require_coin(coin, "coin")?),
            None => LATEST_PATH.to_string(),
        };

        self.client.get(&path, self.client.config().raw_output)
    }

    /// Get bid, ask and last price for a coin
    #[instrument(skip(self))]
    pub fn quote(&self, coin: &str) -> RestResult<Quote> {
        let path = format!("{}/{}", LATEST_PATH, require_coin(coin, "coin")?);
        let mut envelope = self.client.get_envelope(&path)?;

        let prices = envelope
            .remove("prices")
            .ok_or_else(|| RestError::MalformedResponse("missing prices in response".to_string()))?;
        let quote: Quote = serde_json::from_value(prices)
            .map_err(|e| RestError::MalformedResponse(format!("invalid prices: {}", e)))?;

        info!(coin, bid = %quote.bid, ask = %quote.ask, "Current prices");
        Ok(quote)
    }

    /// Get the price history of a coin over the last `age_hours` hours
    ///
    /// The endpoint answers with `[timestamp_ms, price]` pairs, which are
    /// returned sorted oldest first.
    #[instrument(skip(self))]
    pub fn price_history(&self, coin: &str, age_hours: u32) -> RestResult<PriceSeries> {
        let coin = require_coin(coin, "coin")?;
        if age_hours == 0 {
            return Err(RestError::invalid("age", "age must be at least one hour"));
        }

        let to = Utc::now();
        let from = to - Duration::hours(i64::from(age_hours));
        let query = serde_urlencoded::to_string([
            ("symbol", coin.to_uppercase()),
            ("from", from.timestamp_millis().to_string()),
            ("to", to.timestamp_millis().to_string()),
        ])
        .map_err(|e| RestError::invalid("coin", e.to_string()))?;

        let raw = self.client.fetch(&format!("{}?{}", PRICE_HISTORY_PATH, query))?;
        let series = parse_history(&raw)?;

        debug!(coin, samples = series.len(), "Fetched price history");
        Ok(series)
    }

    /// Fetch the price history of a coin and summarize it
    ///
    /// `reference_price` replaces the earliest sample as the growth baseline.
    #[instrument(skip(self))]
    pub fn price_history_stats(
        &self,
        coin: &str,
        age_hours: u32,
        reference_price: Option<f64>,
    ) -> RestResult<PriceStatistics> {
        let coin = require_coin(coin, "coin")?;
        let series = self.price_history(coin, age_hours)?;
        Ok(summarize(&series, coin, reference_price)?)
    }
}

/// Parse a price history payload
///
/// Error envelopes are reported through the usual status check.
fn parse_history(raw: &str) -> RestResult<PriceSeries> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| RestError::MalformedResponse(format!("response is not valid JSON: {}", e)))?;

    if value.is_object() {
        validate(raw)?;
        return Err(RestError::MalformedResponse(
            "expected a list of price samples".to_string(),
        ));
    }

    let pairs: Vec<(f64, f64)> = serde_json::from_value(value)
        .map_err(|e| RestError::MalformedResponse(format!("invalid price samples: {}", e)))?;

    let points = pairs
        .into_iter()
        .map(|(timestamp_ms, price)| {
            PricePoint::from_millis(timestamp_ms as i64, price).ok_or_else(|| {
                RestError::MalformedResponse(format!("timestamp out of range: {}", timestamp_ms))
            })
        })
        .collect::<RestResult<Vec<_>>>()?;

    Ok(PriceSeries::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_history_sorts_samples() {
        let series =
            parse_history("[[1700000120000, 3.5], [1700000000000, 1.5], [1700000060000, 2.5]]")
                .unwrap();

        let prices: Vec<f64> = series.prices().collect();
        assert_eq!(prices, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_parse_history_error_envelope() {
        let err = parse_history(r#"{"status":"error","message":"unknown coin"}"#).unwrap_err();
        assert!(matches!(err, RestError::ApiStatus { .. }));
    }

    #[test]
    fn test_parse_history_malformed() {
        assert!(matches!(
            parse_history(r#"[["a", 1.0]]"#),
            Err(RestError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_history("not json"),
            Err(RestError::MalformedResponse(_))
        ));
    }
}
