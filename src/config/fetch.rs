use super::traits::ConfigSection;
use crate::error::CandlelabError;
use crate::types::Interval;
use serde::{Deserialize, Serialize};

/// Venue-side page size cap for kline queries.
pub const MAX_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSection {
    pub symbol: String,
    pub interval: Interval,
    /// Start of the requested window in ms since epoch. When omitted, a
    /// single request for the most recent `page_size` candles is made.
    pub start_time: Option<i64>,
    pub page_size: usize,
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            interval: Interval::OneMinute,
            start_time: None,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl ConfigSection for FetchSection {
    fn section_name() -> &'static str {
        "fetch"
    }

    fn validate(&self) -> Result<(), CandlelabError> {
        if self.symbol.is_empty() {
            return Err(CandlelabError::Configuration(
                "symbol must not be empty".to_string(),
            ));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(CandlelabError::Configuration(format!(
                "page_size must be in 1..={}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if let Some(start) = self.start_time {
            if start < 0 {
                return Err(CandlelabError::Configuration(format!(
                    "start_time must be non-negative, got {}",
                    start
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(FetchSection::default().validate().is_ok());
    }

    #[test]
    fn test_oversized_page_rejected() {
        let section = FetchSection {
            page_size: MAX_PAGE_SIZE + 1,
            ..FetchSection::default()
        };
        assert!(section.validate().is_err());
    }

    #[test]
    fn test_empty_symbol_rejected() {
        let section = FetchSection {
            symbol: String::new(),
            ..FetchSection::default()
        };
        assert!(section.validate().is_err());
    }
}
