//! Private trading endpoints
//!
//! These endpoints require authentication.

use crate::client::CoinSpotClient;
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::PostOptions;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument};

const BUY_PATH: &str = "/api/v2/my/buy";
const SELL_PATH: &str = "/api/v2/my/sell";

/// Decimal places kept on coin amounts
const AMOUNT_DP: u32 = 8;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    fn path(self) -> &'static str {
        match self {
            Self::Buy => BUY_PATH,
            Self::Sell => SELL_PATH,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Unit an order amount is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountType {
    /// Amount is a coin quantity
    #[default]
    Coin,
    /// Amount is AUD, converted to coin at the order rate
    Aud,
}

impl FromStr for AmountType {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coin" => Ok(Self::Coin),
            "aud" => Ok(Self::Aud),
            other => Err(RestError::invalid(
                "amount_type",
                format!("unknown amount type '{}', expected aud or coin", other),
            )),
        }
    }
}

/// Market order request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketOrder {
    /// Coin to trade
    pub cointype: String,
    /// Amount, in units of `amount_type`
    pub amount: Decimal,
    /// Unit of `amount`
    pub amount_type: AmountType,
    /// Price per coin, resolved from the current ask/bid when absent
    pub rate: Option<Decimal>,
}

impl MarketOrder {
    /// Create an order without a rate
    pub fn new(cointype: impl Into<String>, amount: Decimal, amount_type: AmountType) -> Self {
        Self {
            cointype: cointype.into(),
            amount,
            amount_type,
            rate: None,
        }
    }

    /// Set the rate
    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    fn validate(&self) -> RestResult<()> {
        if self.cointype.trim().is_empty() {
            return Err(RestError::invalid("cointype", "empty coin type provided"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(RestError::invalid("amount", "amount must be positive"));
        }
        if let Some(rate) = self.rate {
            if rate <= Decimal::ZERO {
                return Err(RestError::invalid("rate", "rate must be positive"));
            }
        }
        Ok(())
    }

    /// Coin quantity at `rate`, rounded to 8 decimal places
    ///
    /// Fails when the conversion overflows the decimal range.
    pub fn coin_amount(&self, rate: Decimal) -> RestResult<Decimal> {
        let amount = match self.amount_type {
            AmountType::Coin => Some(self.amount),
            AmountType::Aud => self.amount.checked_div(rate),
        };
        amount
            .map(|amount| amount.round_dp(AMOUNT_DP))
            .ok_or_else(|| out_of_range(self.amount, rate))
    }
}

/// Private trading endpoints
pub struct TradingEndpoints<'a, T> {
    client: &'a CoinSpotClient<T>,
}

impl<'a, T: Transport> TradingEndpoints<'a, T> {
    pub fn new(client: &'a CoinSpotClient<T>) -> Self {
        Self { client }
    }

    /// Place a market buy order
    ///
    /// Without a rate, the current ask price is used.
    #[instrument(skip(self))]
    pub fn market_buy(&self, order: &MarketOrder) -> RestResult<String> {
        self.place(OrderSide::Buy, order)
    }

    /// Place a market sell order
    ///
    /// Without a rate, the current bid price is used.
    #[instrument(skip(self))]
    pub fn market_sell(&self, order: &MarketOrder) -> RestResult<String> {
        self.place(OrderSide::Sell, order)
    }

    /// Rate for an order, looked up from the market when not supplied
    pub fn resolve_rate(&self, side: OrderSide, order: &MarketOrder) -> RestResult<Decimal> {
        if let Some(rate) = order.rate {
            return Ok(rate);
        }

        let quote = self.client.market().quote(&order.cointype)?;
        let rate = match side {
            OrderSide::Buy => quote.ask,
            OrderSide::Sell => quote.bid,
        };

        if rate <= Decimal::ZERO {
            return Err(RestError::MalformedResponse(format!(
                "market returned a non-positive {} rate: {}",
                side, rate
            )));
        }
        Ok(rate)
    }

    fn place(&self, side: OrderSide, order: &MarketOrder) -> RestResult<String> {
        order.validate()?;

        let rate = self.resolve_rate(side, order)?;
        let amount = order.coin_amount(rate)?;
        if amount <= Decimal::ZERO {
            return Err(RestError::invalid(
                "amount",
                "amount rounds to zero coins at this rate",
            ));
        }

        let aud = amount
            .checked_mul(rate)
            .ok_or_else(|| out_of_range(amount, rate))?;

        info!(%side, coin = %order.cointype, %amount, %rate, %aud, "Placing market order");

        let body = json!({
            "cointype": order.cointype.trim(),
            "amount": to_number(amount, "amount")?,
            "rate": to_number(rate, "rate")?,
        });

        let options = PostOptions::with_output(self.client.config().raw_output);
        self.client.post(side.path(), body, options)
    }
}

fn out_of_range(amount: Decimal, rate: Decimal) -> RestError {
    RestError::invalid(
        "amount",
        format!("amount {} at rate {} is out of range", amount, rate),
    )
}

fn to_number(value: Decimal, field: &'static str) -> RestResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| RestError::invalid(field, format!("{} cannot be represented as a number", value)))
}
