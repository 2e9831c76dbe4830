mod binance;

pub use binance::BinanceVenue;

use crate::error::Result;
use crate::types::{Candle, Interval};
use std::time::Duration;

/// Paginated candle-query capability exposed by a trading venue.
///
/// Implementations return candles in ascending timestamp order, at most
/// `limit` per call, starting at `since` when given (otherwise the most
/// recent candles). [`CandleVenue::rate_limit`] is the venue-mandated minimum
/// delay between consecutive requests.
pub trait CandleVenue {
    fn fetch_page(
        &self,
        symbol: &str,
        interval: Interval,
        since: Option<i64>,
        limit: usize,
    ) -> Result<Vec<Candle>>;

    fn rate_limit(&self) -> Duration;
}
