//! Price samples and chronological series

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single price sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Sample time
    pub timestamp: DateTime<Utc>,
    /// Price in the quote currency
    pub price: f64,
}

impl PricePoint {
    /// Create a sample
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Create a sample from a Unix timestamp in milliseconds
    ///
    /// Returns `None` when the timestamp is out of range.
    pub fn from_millis(timestamp_ms: i64, price: f64) -> Option<Self> {
        Utc.timestamp_millis_opt(timestamp_ms)
            .single()
            .map(|timestamp| Self::new(timestamp, price))
    }
}

/// Chronologically ordered price samples for one coin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series, sorting the samples by timestamp
    ///
    /// The sort is stable, so samples sharing a timestamp keep their order.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series has no samples
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest sample
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Most recent sample
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// All samples, oldest first
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Prices in chronological order
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_sorted_on_construction() {
        let series = PriceSeries::new(vec![
            PricePoint::from_millis(3_000, 3.0).unwrap(),
            PricePoint::from_millis(1_000, 1.0).unwrap(),
            PricePoint::from_millis(2_000, 2.0).unwrap(),
        ]);

        let prices: Vec<f64> = series.prices().collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first().unwrap().timestamp.timestamp_millis(), 1_000);
        assert_eq!(series.last().unwrap().timestamp.timestamp_millis(), 3_000);
    }

    #[test]
    fn test_from_millis_keeps_precision() {
        let point = PricePoint::from_millis(1_700_000_000_123, 42.5).unwrap();
        assert_eq!(point.timestamp.timestamp_subsec_millis(), 123);
        assert_eq!(point.timestamp.to_rfc3339(), "2023-11-14T22:13:20.123+00:00");
    }

    #[test]
    fn test_series_serializes_as_array() {
        let series = PriceSeries::new(vec![PricePoint::from_millis(0, 1.5).unwrap()]);
        let json = serde_json::to_value(&series).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["price"], 1.5);
        assert_eq!(json[0]["timestamp"], "1970-01-01T00:00:00Z");
    }
}
