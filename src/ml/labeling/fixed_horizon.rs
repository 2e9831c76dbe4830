use super::config::{FixedHorizonConfig, Label};
use super::dataset::Dataset;
use crate::error::{CandlelabError, Result};
use crate::types::CandleSequence;

/// Columnar lag-and-compare: label is 1 when the close `horizon` candles
/// ahead is strictly greater than the current close, else 0. No path
/// dependency, so no unresolved state exists; trailing candles without a
/// future reference are excluded outright.
pub struct FixedHorizonLabeler {
    config: FixedHorizonConfig,
}

impl FixedHorizonLabeler {
    pub fn new(config: FixedHorizonConfig) -> Result<Self> {
        if config.horizon == 0 {
            return Err(CandlelabError::Configuration(
                "horizon must be at least 1".to_string(),
            ));
        }
        Ok(Self { config })
    }

    pub fn label(&self, candles: &CandleSequence) -> Dataset {
        let len = candles.len();
        let labelable = len.saturating_sub(self.config.horizon);

        let outcomes = (0..labelable)
            .map(|i| {
                let entry = candles[i];
                let future_close = candles[i + self.config.horizon].close;
                let label = if future_close > entry.close {
                    Label::TakeProfit
                } else {
                    Label::StopLoss
                };
                (entry, label)
            })
            .collect::<Vec<_>>();

        Dataset::from_outcomes(outcomes, len - labelable)
    }
}
