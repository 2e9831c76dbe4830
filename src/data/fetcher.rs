use super::venue::CandleVenue;
use crate::config::FetchSection;
use crate::error::{CandlelabError, Result};
use crate::types::{Candle, CandleSequence};

/// Result of a completed fetch. An empty first response is a distinct
/// outcome, not an error: the venue simply has nothing for the range.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    History(CandleSequence),
    NoData,
}

impl FetchOutcome {
    /// Treat `NoData` as a hard failure.
    pub fn require_data(self) -> Result<CandleSequence> {
        match self {
            Self::History(sequence) => Ok(sequence),
            Self::NoData => Err(CandlelabError::EmptyHistory),
        }
    }
}

/// Paginates a venue's kline endpoint with a moving cursor until the
/// requested window is filled or the upstream history is exhausted.
pub struct CandleFetcher<V: CandleVenue> {
    venue: V,
}

impl<V: CandleVenue> CandleFetcher<V> {
    pub fn new(venue: V) -> Self {
        Self { venue }
    }

    pub fn venue(&self) -> &V {
        &self.venue
    }

    /// Fetch `[start_time, now)`, or the most recent `page_size` candles when
    /// `start_time` is omitted. Any transport failure aborts the whole fetch;
    /// no partial sequence is surfaced.
    pub fn fetch(&self, config: &FetchSection) -> Result<FetchOutcome> {
        let mut candles: Vec<Candle> = Vec::new();
        let mut cursor = config.start_time;

        loop {
            let page =
                self.venue
                    .fetch_page(&config.symbol, config.interval, cursor, config.page_size)?;

            if page.is_empty() {
                if candles.is_empty() {
                    return Ok(FetchOutcome::NoData);
                }
                break;
            }

            // Cursor invariant: no duplicate or backwards timestamp across a
            // page boundary.
            if let (Some(last), Some(first)) = (candles.last(), page.first()) {
                if first.timestamp <= last.timestamp {
                    return Err(CandlelabError::Validation(format!(
                        "Venue returned non-monotonic page: {} after {}",
                        first.timestamp, last.timestamp
                    )));
                }
            }

            let page_len = page.len();
            let last_timestamp = page[page_len - 1].timestamp;
            candles.extend(page);

            log::debug!(
                "Fetched page of {} candles, {} total, cursor at {:?}",
                page_len,
                candles.len(),
                cursor
            );

            // A short page means upstream history is exhausted. Without a
            // start time there is nothing to paginate: one request returns
            // the most recent page_size candles.
            if page_len < config.page_size || config.start_time.is_none() {
                break;
            }

            cursor = Some(last_timestamp + config.interval.as_millis());
            std::thread::sleep(self.venue.rate_limit());
        }

        let sequence = CandleSequence::from_candles_with_interval(candles, config.interval)?;
        log::info!(
            "Fetched {} candles of {} {}",
            sequence.len(),
            config.symbol,
            config.interval
        );
        Ok(FetchOutcome::History(sequence))
    }
}
