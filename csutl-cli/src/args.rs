//! Command line arguments

use clap::{Parser, Subcommand, ValueEnum};
use csutl_rest::{AmountType, OrderQuery, DEFAULT_BASE_URL};
use rust_decimal::Decimal;

/// CoinSpot Utility
#[derive(Debug, Parser)]
#[command(name = "csutl", version, about = "CoinSpot Utility")]
pub struct Args {
    /// Enable debug output
    #[arg(short = 'd', global = true)]
    pub debug: bool,

    /// Raw (unpretty) json output
    #[arg(long = "raw-output", global = true)]
    pub raw_output: bool,

    /// API host
    #[arg(long, env = "COINSPOT_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Perform a get request against the CoinSpot API
    Get {
        /// URL endpoint
        url: String,
    },

    /// Perform a post request against the CoinSpot API, payload read from stdin
    Post {
        /// URL endpoint
        url: String,

        /// Don't parse input or add nonce
        #[arg(long = "raw-input")]
        raw_input: bool,
    },

    /// Retrieve account balance
    Balance {
        /// Coin type
        #[arg(short = 't')]
        cointype: Option<String>,
    },

    /// Retrieve price history
    #[command(name = "price_history")]
    PriceHistory {
        /// Coin type
        cointype: String,

        /// Age (e.g. 4h, 3d or 2w)
        #[arg(short = 'a', default_value = "1d", value_parser = parse_age)]
        age: u32,

        /// Display stats
        #[arg(short = 's')]
        stats: bool,

        /// Reference price
        #[arg(short = 'r')]
        reference_price: Option<f64>,
    },

    /// Retrieve account order history
    #[command(name = "order_history")]
    OrderHistory(OrderFilter),

    /// Market orders
    Market {
        #[command(subcommand)]
        command: MarketCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum MarketCommand {
    /// Display open market orders
    Orders {
        #[command(flatten)]
        filter: OrderFilter,

        /// Show completed orders
        #[arg(short = 'c')]
        completed: bool,
    },

    /// Place buy order
    Buy(OrderArgs),

    /// Place sell order
    Sell(OrderArgs),
}

/// Filters shared by the order listing commands
#[derive(Debug, Clone, clap::Args)]
pub struct OrderFilter {
    /// Start date
    #[arg(short = 's')]
    pub start_date: Option<String>,

    /// End date
    #[arg(short = 'e')]
    pub end_date: Option<String>,

    /// Result limit (default 200, max 500)
    #[arg(short = 'l')]
    pub limit: Option<u32>,

    /// Coin type
    #[arg(short = 't')]
    pub cointype: Option<String>,
}

impl From<&OrderFilter> for OrderQuery {
    fn from(filter: &OrderFilter) -> Self {
        Self {
            limit: filter.limit,
            cointype: filter.cointype.clone(),
            start_date: filter.start_date.clone(),
            end_date: filter.end_date.clone(),
        }
    }
}

/// Market buy/sell arguments
#[derive(Debug, Clone, clap::Args)]
pub struct OrderArgs {
    /// Coin type
    pub cointype: String,

    /// Amount type
    #[arg(value_enum)]
    pub amount_type: AmountUnit,

    /// Amount
    pub amount: Decimal,

    /// Rate, defaults to the current ask (buy) or bid (sell)
    #[arg(short = 'r')]
    pub rate: Option<Decimal>,
}

/// Unit of an order amount on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AmountUnit {
    Aud,
    Coin,
}

impl From<AmountUnit> for AmountType {
    fn from(unit: AmountUnit) -> Self {
        match unit {
            AmountUnit::Aud => AmountType::Aud,
            AmountUnit::Coin => AmountType::Coin,
        }
    }
}

/// Parse an age such as `4h`, `3d` or `2w` into hours
///
/// A bare number is taken as hours.
pub fn parse_age(raw: &str) -> Result<u32, String> {
    let raw = raw.trim();
    let (digits, multiplier) = if let Some(hours) = raw.strip_suffix('h') {
        (hours, 1)
    } else if let Some(days) = raw.strip_suffix('d') {
        (days, 24)
    } else if let Some(weeks) = raw.strip_suffix('w') {
        (weeks, 24 * 7)
    } else {
        (raw, 1)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Age is not a valid format: {}", raw));
    }

    let hours = digits
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| format!("Age is too large: {}", raw))?;

    if hours == 0 {
        return Err("Age must be at least one hour".to_string());
    }
    Ok(hours)
}
