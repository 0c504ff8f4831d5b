//! Private read-only account endpoints
//!
//! These endpoints require authentication.

use super::require_coin;
use crate::client::CoinSpotClient;
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::{PostOptions, RequestBody};
use serde_json::{Map, Value};
use tracing::instrument;

const BALANCES_PATH: &str = "/api/v2/ro/my/balances";
const COMPLETED_ORDERS_PATH: &str = "/api/v2/ro/my/orders/completed";
const OPEN_MARKET_ORDERS_PATH: &str = "/api/v2/ro/my/orders/market/open";
const COMPLETED_MARKET_ORDERS_PATH: &str = "/api/v2/ro/my/orders/market/completed";

/// Number of orders requested when no limit is given
pub const DEFAULT_ORDER_LIMIT: u32 = 200;

/// Filters for order history requests
///
/// Unset fields are left out of the request; the exchange validates ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    /// Maximum number of orders (default 200)
    pub limit: Option<u32>,
    /// Restrict to one coin
    pub cointype: Option<String>,
    /// Earliest order date
    pub start_date: Option<String>,
    /// Latest order date
    pub end_date: Option<String>,
}

impl OrderQuery {
    /// Request body for this query
    pub fn to_body(&self) -> RestResult<RequestBody> {
        let mut body = Map::new();
        body.insert(
            "limit".to_string(),
            Value::from(self.limit.unwrap_or(DEFAULT_ORDER_LIMIT)),
        );

        if let Some(cointype) = &self.cointype {
            if cointype.trim().is_empty() {
                return Err(RestError::invalid("cointype", "empty coin type provided"));
            }
            body.insert("cointype".to_string(), Value::from(cointype.as_str()));
        }
        if let Some(start_date) = &self.start_date {
            body.insert("startdate".to_string(), Value::from(start_date.as_str()));
        }
        if let Some(end_date) = &self.end_date {
            body.insert("enddate".to_string(), Value::from(end_date.as_str()));
        }

        Ok(body.into())
    }
}

/// Private read-only account endpoints
pub struct AccountEndpoints<'a, T> {
    client: &'a CoinSpotClient<T>,
}

impl<'a, T: Transport> AccountEndpoints<'a, T> {
    pub fn new(client: &'a CoinSpotClient<T>) -> Self {
        Self { client }
    }

    fn post(&self, path: &str, body: RequestBody) -> RestResult<String> {
        let options = PostOptions::with_output(self.client.config().raw_output);
        self.client.post(path, body, options)
    }

    /// Get account balances, or the available balance of one coin
    #[instrument(skip(self))]
    pub fn balances(&self, coin: Option<&str>) -> RestResult<String> {
        let path = match coin {
            Some(coin) => format!(
                "/api/v2/ro/my/balance/{}?available=yes",
                require_coin(coin, "cointype")?
            ),
            None => BALANCES_PATH.to_string(),
        };

        self.post(&path, RequestBody::empty())
    }

    /// Get completed order history
    #[instrument(skip(self))]
    pub fn order_history(&self, query: &OrderQuery) -> RestResult<String> {
        self.post(COMPLETED_ORDERS_PATH, query.to_body()?)
    }

    /// Get open or completed market orders
    #[instrument(skip(self))]
    pub fn market_orders(&self, query: &OrderQuery, completed: bool) -> RestResult<String> {
        let path = if completed {
            COMPLETED_MARKET_ORDERS_PATH
        } else {
            OPEN_MARKET_ORDERS_PATH
        };

        self.post(path, query.to_body()?)
    }
}
