//! Descriptive statistics over a price series
//!
//! Quantile cuts use linear interpolation between order statistics (the
//! "inclusive" method): for cut `i` of `k` groups over `n` sorted prices the
//! fractional rank is `(n - 1) * i / k`. Quartiles and deciles share the same
//! method so the `latest` positions are consistent across both scales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StatsError, StatsResult};
use crate::series::PriceSeries;

const QUARTILE_GROUPS: usize = 4;
const DECILE_GROUPS: usize = 10;

/// Summary of a price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    /// Coin the series belongs to
    pub coin: String,
    /// Timestamp of the earliest sample
    pub start_date: DateTime<Utc>,
    /// Timestamp of the most recent sample
    pub end_date: DateTime<Utc>,
    /// Number of samples
    pub count: usize,
    pub min: f64,
    pub max: f64,
    /// Arithmetic mean
    pub avg: f64,
    /// Median
    pub med: f64,
    /// `max - min`
    pub width: f64,
    /// Baseline used for growth (reference price, or the earliest sample)
    pub reference_price: f64,
    /// Most recent price minus the baseline
    pub growth: f64,
    /// Growth as a percentage of the baseline
    pub growth_pct: f64,
    /// Three cuts splitting the prices into four groups
    pub quartiles: Vec<f64>,
    /// Nine cuts splitting the prices into ten groups
    pub ten_quantiles: Vec<f64>,
    /// Population standard deviation
    pub pstdev: f64,
    /// Position of the most recent price on each scale
    pub latest: LatestIndices,
}

/// Where the most recent price sits relative to the rest of the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestIndices {
    /// Most recent price
    pub price: f64,
    /// Continuous position on the quartile scale, 0 at min through 4 at max
    pub quartile_index: f64,
    /// Continuous position on the decile scale, 0 at min through 10 at max
    pub ten_quantile_index: f64,
    /// 0 at min, 1 at max
    pub width_index: f64,
    /// Z-score against the population standard deviation
    pub pstdev_index: f64,
}

/// Summarize a price series
///
/// `reference_price`, when given, replaces the earliest sample as the growth
/// baseline.
///
/// # Errors
///
/// [`StatsError::InvalidArgument`] when the series is empty, or when the
/// baseline, width or standard deviation is zero and a derived ratio cannot
/// be computed.
pub fn summarize(
    series: &PriceSeries,
    coin: &str,
    reference_price: Option<f64>,
) -> StatsResult<PriceStatistics> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(StatsError::invalid("series", "price series is empty")),
    };

    let mut sorted: Vec<f64> = series.prices().collect();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let min = sorted[0];
    let max = sorted[count - 1];
    let avg = sorted.iter().sum::<f64>() / count as f64;
    let med = median(&sorted);
    let width = max - min;

    let baseline = reference_price.unwrap_or(first.price);
    if baseline == 0.0 {
        return Err(StatsError::invalid(
            "growth_pct",
            "baseline price is zero, growth percentage is undefined",
        ));
    }
    let growth = last.price - baseline;
    let growth_pct = growth * 100.0 / baseline;

    let quartiles = quantile_cuts(&sorted, QUARTILE_GROUPS);
    let ten_quantiles = quantile_cuts(&sorted, DECILE_GROUPS);

    let variance = sorted.iter().map(|p| (p - avg).powi(2)).sum::<f64>() / count as f64;
    let pstdev = variance.sqrt();

    let price = last.price;
    if width == 0.0 {
        return Err(StatsError::invalid(
            "width_index",
            "price width is zero, every sample has the same price",
        ));
    }
    if pstdev == 0.0 {
        return Err(StatsError::invalid(
            "pstdev_index",
            "population standard deviation is zero",
        ));
    }

    let latest = LatestIndices {
        price,
        quartile_index: scale_position(price, min, &quartiles, max),
        ten_quantile_index: scale_position(price, min, &ten_quantiles, max),
        width_index: (price - min) / width,
        pstdev_index: (price - avg) / pstdev,
    };

    debug!(coin, count, min, max, avg, pstdev, "Summarized price series");

    Ok(PriceStatistics {
        coin: coin.to_string(),
        start_date: first.timestamp,
        end_date: last.timestamp,
        count,
        min,
        max,
        avg,
        med,
        width,
        reference_price: baseline,
        growth,
        growth_pct,
        quartiles,
        ten_quantiles,
        pstdev,
        latest,
    })
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Cut points splitting sorted values into `groups` equal-probability groups
///
/// Returns `groups - 1` values. `sorted` must be non-empty and ascending.
pub fn quantile_cuts(sorted: &[f64], groups: usize) -> Vec<f64> {
    let last = sorted.len() - 1;
    (1..groups)
        .map(|i| {
            let rank = last as f64 * i as f64 / groups as f64;
            let lower = rank.floor() as usize;
            let fraction = rank - lower as f64;
            match sorted.get(lower + 1) {
                Some(upper) => sorted[lower] + fraction * (upper - sorted[lower]),
                None => sorted[lower],
            }
        })
        .collect()
}

/// Continuous position of `value` on a cut scale
///
/// Anchors are `min` at 0, `cuts[j]` at `j + 1` and `max` at `cuts.len() + 1`,
/// interpolating linearly between neighbours. A zero-width segment resolves
/// to its lower position.
pub fn scale_position(value: f64, min: f64, cuts: &[f64], max: f64) -> f64 {
    let anchors: Vec<f64> = std::iter::once(min)
        .chain(cuts.iter().copied())
        .chain(std::iter::once(max))
        .collect();

    for (i, segment) in anchors.windows(2).enumerate() {
        let (lower, upper) = (segment[0], segment[1]);
        if value <= upper {
            if upper > lower {
                return i as f64 + ((value - lower) / (upper - lower)).max(0.0);
            }
            return i as f64;
        }
    }

    (anchors.len() - 1) as f64
}
