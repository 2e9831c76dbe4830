use super::CandleVenue;
use crate::error::{CandlelabError, Result};
use crate::types::{Candle, Interval};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.binance.com";
const REQUEST_TIMEOUT_MS: u64 = 5000;
/// Minimum pause between kline requests, matching the venue's advertised
/// request pacing for unauthenticated market-data calls.
const RATE_LIMIT_MS: u64 = 100;

/// Public Binance spot kline endpoint. Historical market data needs no API
/// key; an auth or transport failure is fatal to the whole fetch.
pub struct BinanceVenue {
    client: Client,
    base_url: String,
    rate_limit: Duration,
}

impl BinanceVenue {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()
            .map_err(|e| CandlelabError::FetchTransport(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            rate_limit: Duration::from_millis(RATE_LIMIT_MS),
        })
    }

    fn parse_kline(row: &Value) -> Result<Candle> {
        let fields = row.as_array().ok_or_else(|| {
            CandlelabError::Validation(format!("Kline row is not an array: {}", row))
        })?;
        if fields.len() < 6 {
            return Err(CandlelabError::Validation(format!(
                "Kline row has {} fields, expected at least 6",
                fields.len()
            )));
        }

        let timestamp = fields[0].as_i64().ok_or_else(|| {
            CandlelabError::Validation(format!("Kline open time is not an integer: {}", fields[0]))
        })?;

        Ok(Candle {
            timestamp,
            open: Self::parse_price(&fields[1])?,
            high: Self::parse_price(&fields[2])?,
            low: Self::parse_price(&fields[3])?,
            close: Self::parse_price(&fields[4])?,
            volume: Self::parse_price(&fields[5])?,
        })
    }

    // Binance encodes prices as JSON strings ("42350.10000000").
    fn parse_price(value: &Value) -> Result<f64> {
        match value {
            Value::String(s) => s.parse::<f64>().map_err(|_| {
                CandlelabError::Validation(format!("Unparseable price field: {}", s))
            }),
            Value::Number(n) => n.as_f64().ok_or_else(|| {
                CandlelabError::Validation(format!("Unparseable price field: {}", n))
            }),
            other => Err(CandlelabError::Validation(format!(
                "Unexpected price field: {}",
                other
            ))),
        }
    }
}

impl CandleVenue for BinanceVenue {
    fn fetch_page(
        &self,
        symbol: &str,
        interval: Interval,
        since: Option<i64>,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        let mut url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base_url,
            symbol,
            interval.as_str(),
            limit
        );
        if let Some(start) = since {
            url.push_str(&format!("&startTime={}", start));
        }

        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CandlelabError::FetchTransport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CandlelabError::FetchTransport(format!(
                "Venue returned {}: {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .map_err(|e| CandlelabError::FetchTransport(format!("Invalid response body: {}", e)))?;
        let rows = body.as_array().ok_or_else(|| {
            CandlelabError::Validation(format!("Kline response is not an array: {}", body))
        })?;

        rows.iter().map(Self::parse_kline).collect()
    }

    fn rate_limit(&self) -> Duration {
        self.rate_limit
    }
}
