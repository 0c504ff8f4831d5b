//! Price history series and statistics
//!
//! [`PriceSeries`] holds chronologically ordered `(timestamp, price)` samples
//! for one coin. [`summarize`] reduces a series to a [`PriceStatistics`]
//! record: range, mean, median, growth against a baseline, quartile and
//! decile cuts, population standard deviation, and where the most recent
//! price sits on each of those scales.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use csutl_stats::{summarize, PricePoint, PriceSeries};
//!
//! let start = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
//! let series = PriceSeries::new(
//!     [100.0, 110.0, 90.0, 120.0]
//!         .iter()
//!         .enumerate()
//!         .map(|(i, price)| PricePoint::new(start + chrono::Duration::hours(i as i64), *price))
//!         .collect(),
//! );
//!
//! let stats = summarize(&series, "BTC", None).unwrap();
//! assert_eq!(stats.width, 30.0);
//! assert_eq!(stats.growth, 20.0);
//! ```

mod error;
mod series;
mod statistics;

pub use error::{StatsError, StatsResult};
pub use series::{PricePoint, PriceSeries};
pub use statistics::{quantile_cuts, scale_position, summarize, LatestIndices, PriceStatistics};
