use crate::error::{CandlelabError, Result};
use crate::types::{Candle, CandleSequence};
use polars::prelude::*;
use std::collections::HashMap;

/// Required columns for an externally supplied candle frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredColumn {
    Timestamp,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl RequiredColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Timestamp,
            Self::Open,
            Self::High,
            Self::Low,
            Self::Close,
            Self::Volume,
        ]
    }

    /// Common alternative column names
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Timestamp => vec!["timestamp", "Timestamp", "time", "open_time", "t"],
            Self::Open => vec!["open", "Open", "OPEN", "o"],
            Self::High => vec!["high", "High", "HIGH", "h"],
            Self::Low => vec!["low", "Low", "LOW", "l"],
            Self::Close => vec!["close", "Close", "CLOSE", "c"],
            Self::Volume => vec!["volume", "Volume", "VOLUME", "vol", "Vol", "v"],
        }
    }
}

/// Precondition checks for sequences supplied from outside the fetcher.
/// All violations are reported before labeling starts.
pub struct SequenceValidator;

impl SequenceValidator {
    /// Validate that a DataFrame has the required candle columns, mapping
    /// each to the actual column name found.
    pub fn validate_columns(df: &DataFrame) -> Result<HashMap<RequiredColumn, String>> {
        let mut column_map = HashMap::new();

        for required in RequiredColumn::all() {
            match Self::find_column(df, &required) {
                Some(col_name) => {
                    column_map.insert(required, col_name.to_string());
                }
                None => {
                    return Err(CandlelabError::Validation(format!(
                        "Missing required column: {} (tried aliases: {:?})",
                        required.as_str(),
                        required.aliases()
                    )));
                }
            }
        }

        for (req_col, actual_name) in &column_map {
            let series = df.column(actual_name)?;
            if !matches!(
                series.dtype(),
                DataType::Float64
                    | DataType::Float32
                    | DataType::Int64
                    | DataType::Int32
                    | DataType::UInt64
                    | DataType::UInt32
            ) {
                return Err(CandlelabError::Validation(format!(
                    "Column '{}' ({}) must be numeric, found {:?}",
                    actual_name,
                    req_col.as_str(),
                    series.dtype()
                )));
            }
        }

        Self::validate_ohlc_relationships(df, &column_map)?;
        Self::validate_timestamps(df, &column_map)?;

        Ok(column_map)
    }

    /// Find column by checking aliases
    fn find_column<'a>(df: &'a DataFrame, required: &RequiredColumn) -> Option<&'a str> {
        let columns = df.get_column_names();
        for alias in required.aliases() {
            if columns.iter().any(|col| col.as_str() == alias) {
                return Some(alias);
            }
        }
        None
    }

    /// Validate OHLC relationships (high >= low, high >= open/close, ...)
    fn validate_ohlc_relationships(
        df: &DataFrame,
        column_map: &HashMap<RequiredColumn, String>,
    ) -> Result<()> {
        let high = Self::f64_column(df, column_map, RequiredColumn::High)?;
        let low = Self::f64_column(df, column_map, RequiredColumn::Low)?;
        let open = Self::f64_column(df, column_map, RequiredColumn::Open)?;
        let close = Self::f64_column(df, column_map, RequiredColumn::Close)?;

        let high = high.f64()?;
        let low = low.f64()?;
        let open = open.f64()?;
        let close = close.f64()?;

        for i in 0..df.height() {
            if let (Some(h), Some(l), Some(o), Some(c)) =
                (high.get(i), low.get(i), open.get(i), close.get(i))
            {
                if h < l {
                    return Err(CandlelabError::Validation(format!(
                        "Invalid data at row {}: high ({}) < low ({})",
                        i, h, l
                    )));
                }
                if h < o || h < c {
                    return Err(CandlelabError::Validation(format!(
                        "Invalid data at row {}: high ({}) < open ({}) or close ({})",
                        i, h, o, c
                    )));
                }
                if l > o || l > c {
                    return Err(CandlelabError::Validation(format!(
                        "Invalid data at row {}: low ({}) > open ({}) or close ({})",
                        i, l, o, c
                    )));
                }
            }
        }

        Ok(())
    }

    /// Timestamps must be strictly increasing with no duplicates.
    fn validate_timestamps(
        df: &DataFrame,
        column_map: &HashMap<RequiredColumn, String>,
    ) -> Result<()> {
        let ts_name = column_map
            .get(&RequiredColumn::Timestamp)
            .ok_or_else(|| CandlelabError::Validation("Timestamp column unmapped".to_string()))?;
        let ts = df.column(ts_name)?.cast(&DataType::Int64)?;
        let ts = ts.i64()?;

        let mut prev: Option<i64> = None;
        for i in 0..df.height() {
            if let Some(current) = ts.get(i) {
                if let Some(p) = prev {
                    if current <= p {
                        return Err(CandlelabError::Validation(format!(
                            "Invalid data at row {}: timestamp {} not after {}",
                            i, current, p
                        )));
                    }
                }
                prev = Some(current);
            } else {
                return Err(CandlelabError::Validation(format!(
                    "Invalid data at row {}: null timestamp",
                    i
                )));
            }
        }

        Ok(())
    }

    /// Check for null values in any column
    pub fn check_nulls(df: &DataFrame) -> Result<Vec<(String, usize)>> {
        let mut null_report = Vec::new();

        for col_name in df.get_column_names() {
            let series = df.column(col_name)?;
            let null_count = series.null_count();
            if null_count > 0 {
                null_report.push((col_name.to_string(), null_count));
            }
        }

        Ok(null_report)
    }

    /// Validate an externally supplied frame and convert it to a sequence.
    pub fn to_sequence(df: &DataFrame) -> Result<CandleSequence> {
        let column_map = Self::validate_columns(df)?;

        let null_report = Self::check_nulls(df)?;
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        let ts = df
            .column(&column_map[&RequiredColumn::Timestamp])?
            .cast(&DataType::Int64)?;
        let ts = ts.i64()?;
        let open = Self::f64_column(df, &column_map, RequiredColumn::Open)?;
        let high = Self::f64_column(df, &column_map, RequiredColumn::High)?;
        let low = Self::f64_column(df, &column_map, RequiredColumn::Low)?;
        let close = Self::f64_column(df, &column_map, RequiredColumn::Close)?;
        let volume = Self::f64_column(df, &column_map, RequiredColumn::Volume)?;
        let (open, high) = (open.f64()?, high.f64()?);
        let (low, close) = (low.f64()?, close.f64()?);
        let volume = volume.f64()?;

        let mut candles = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            match (
                ts.get(i),
                open.get(i),
                high.get(i),
                low.get(i),
                close.get(i),
                volume.get(i),
            ) {
                (Some(t), Some(o), Some(h), Some(l), Some(c), Some(v)) => {
                    candles.push(Candle {
                        timestamp: t,
                        open: o,
                        high: h,
                        low: l,
                        close: c,
                        volume: v,
                    });
                }
                _ => {
                    return Err(CandlelabError::Validation(format!(
                        "Invalid data at row {}: null value in required column",
                        i
                    )));
                }
            }
        }

        CandleSequence::from_candles(candles)
    }

    fn f64_column(
        df: &DataFrame,
        column_map: &HashMap<RequiredColumn, String>,
        col: RequiredColumn,
    ) -> Result<Column> {
        let name = column_map
            .get(&col)
            .ok_or_else(|| CandlelabError::Validation(format!("{} column unmapped", col.as_str())))?;
        Ok(df.column(name)?.cast(&DataType::Float64)?)
    }
}
