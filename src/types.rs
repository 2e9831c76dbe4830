use crate::error::{CandlelabError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle interval supported by the venue kline endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
        }
    }

    /// Width of one candle bucket in milliseconds.
    pub fn as_millis(&self) -> i64 {
        match self {
            Self::OneMinute => 60_000,
            Self::FiveMinutes => 300_000,
            Self::FifteenMinutes => 900_000,
            Self::OneHour => 3_600_000,
            Self::FourHours => 14_400_000,
            Self::OneDay => 86_400_000,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::OneMinute,
            Self::FiveMinutes,
            Self::FifteenMinutes,
            Self::OneHour,
            Self::FourHours,
            Self::OneDay,
        ]
    }
}

impl FromStr for Interval {
    type Err = CandlelabError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| {
                CandlelabError::Configuration(format!("Unknown interval: {}", s))
            })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fixed-interval OHLCV bucket. Timestamp is the bucket open time in
/// milliseconds since epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Ordered, gap-free candle history. Timestamps are unique and strictly
/// increasing; when the interval is known, consecutive timestamps differ by
/// exactly one interval width.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSequence {
    candles: Vec<Candle>,
}

impl CandleSequence {
    /// Build a sequence, enforcing strictly increasing timestamps.
    pub fn from_candles(candles: Vec<Candle>) -> Result<Self> {
        Self::check_monotonic(&candles, None)?;
        Ok(Self { candles })
    }

    /// Build a sequence, additionally enforcing a fixed timestamp step of one
    /// interval width between consecutive candles.
    pub fn from_candles_with_interval(candles: Vec<Candle>, interval: Interval) -> Result<Self> {
        Self::check_monotonic(&candles, Some(interval))?;
        Ok(Self { candles })
    }

    fn check_monotonic(candles: &[Candle], interval: Option<Interval>) -> Result<()> {
        for pair in candles.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.timestamp <= prev.timestamp {
                return Err(CandlelabError::Validation(format!(
                    "Timestamps not strictly increasing: {} followed by {}",
                    prev.timestamp, next.timestamp
                )));
            }
            if let Some(interval) = interval {
                let step = next.timestamp - prev.timestamp;
                if step != interval.as_millis() {
                    return Err(CandlelabError::Validation(format!(
                        "Gap in candle history: expected step {} ms, found {} ms at {}",
                        interval.as_millis(),
                        step,
                        prev.timestamp
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.candles.iter()
    }

    /// Columnar view of the sequence.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let df = df! {
            "timestamp" => self.candles.iter().map(|c| c.timestamp).collect::<Vec<i64>>(),
            "open" => self.candles.iter().map(|c| c.open).collect::<Vec<f64>>(),
            "high" => self.candles.iter().map(|c| c.high).collect::<Vec<f64>>(),
            "low" => self.candles.iter().map(|c| c.low).collect::<Vec<f64>>(),
            "close" => self.candles.iter().map(|c| c.close).collect::<Vec<f64>>(),
            "volume" => self.candles.iter().map(|c| c.volume).collect::<Vec<f64>>(),
        }?;
        Ok(df)
    }
}

impl std::ops::Index<usize> for CandleSequence {
    type Output = Candle;

    fn index(&self, index: usize) -> &Candle {
        &self.candles[index]
    }
}

impl<'a> IntoIterator for &'a CandleSequence {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(ts: i64) -> Candle {
        Candle {
            timestamp: ts,
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            volume: 1000.0,
        }
    }

    #[test]
    fn test_interval_round_trip() {
        for interval in Interval::all() {
            let parsed: Interval = interval.as_str().parse().unwrap();
            assert_eq!(parsed, interval);
        }
        assert!("3w".parse::<Interval>().is_err());
    }

    #[test]
    fn test_sequence_rejects_duplicate_timestamps() {
        let result = CandleSequence::from_candles(vec![candle(1000), candle(1000)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_sequence_rejects_decreasing_timestamps() {
        let result = CandleSequence::from_candles(vec![candle(2000), candle(1000)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_sequence_rejects_gaps_when_interval_known() {
        let candles = vec![candle(0), candle(60_000), candle(180_000)];
        let result = CandleSequence::from_candles_with_interval(candles, Interval::OneMinute);
        assert!(result.is_err());
    }

    #[test]
    fn test_sequence_accepts_fixed_step() {
        let candles = vec![candle(0), candle(60_000), candle(120_000)];
        let seq =
            CandleSequence::from_candles_with_interval(candles, Interval::OneMinute).unwrap();
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_to_dataframe_columns() {
        let seq = CandleSequence::from_candles(vec![candle(0), candle(60_000)]).unwrap();
        let df = seq.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        let names = df.get_column_names();
        for expected in ["timestamp", "open", "high", "low", "close", "volume"] {
            assert!(names.iter().any(|c| c.as_str() == expected));
        }
    }
}
