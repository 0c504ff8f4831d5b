//! API endpoint implementations

use crate::error::{RestError, RestResult};

pub mod market;
pub mod account;
pub mod trading;

pub use market::MarketEndpoints;
pub use account::{AccountEndpoints, OrderQuery};
pub use trading::{AmountType, MarketOrder, OrderSide, TradingEndpoints};

/// Trimmed coin symbol, safe to place in a request path
///
/// Symbols are ASCII letters and digits only.
pub(crate) fn require_coin<'c>(coin: &'c str, field: &'static str) -> RestResult<&'c str> {
    let coin = coin.trim();
    if coin.is_empty() {
        return Err(RestError::invalid(field, "empty coin type provided"));
    }
    if !coin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(RestError::invalid(
            field,
            format!("invalid coin type '{}', expected letters and digits", coin),
        ));
    }
    Ok(coin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_coin_trims() {
        assert_eq!(require_coin(" BTC ", "coin").unwrap(), "BTC");
        assert_eq!(require_coin("1INCH", "coin").unwrap(), "1INCH");
    }

    #[test]
    fn test_require_coin_rejects_path_characters() {
        for coin in ["", "  ", "BTC?x", "BTC/..", "BTC&available=no", "B TC", "BTC#"] {
            assert!(
                matches!(
                    require_coin(coin, "cointype"),
                    Err(RestError::InvalidArgument { field: "cointype", .. })
                ),
                "{coin:?} should be rejected"
            );
        }
    }
}
