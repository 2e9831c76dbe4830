use super::config::{Label, TripleBarrierConfig};
use super::dataset::Dataset;
use crate::error::{CandlelabError, Result};
use crate::types::CandleSequence;
use rayon::prelude::*;

/// Per-candle scan state. `TpHit`, `SlHit` and `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Scanning,
    TpHit,
    SlHit,
    Exhausted,
}

impl ScanState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Scanning)
    }
}

/// State machine for one entry candle's lookahead scan.
///
/// Bars are fed in chronological order via [`BarrierScan::observe`]. Within a
/// single bar the take-profit check runs before the stop-loss check, so when
/// both barriers are touched by the same bar the take-profit wins. OHLC data
/// cannot order intrabar excursions, so this tie-break is a modeling
/// assumption kept for reproducibility, not a market fact.
#[derive(Debug, Clone)]
pub struct BarrierScan {
    tp_price: f64,
    sl_price: f64,
    remaining: usize,
    state: ScanState,
}

impl BarrierScan {
    pub fn new(entry_price: f64, config: &TripleBarrierConfig) -> Self {
        Self {
            tp_price: entry_price * (1.0 + config.take_profit_pct),
            sl_price: entry_price * (1.0 - config.stop_loss_pct),
            remaining: config.lookahead_bars,
            state: ScanState::Scanning,
        }
    }

    /// Feed the next bar of the lookahead window. Returns the state after the
    /// observation; once terminal, further bars are ignored.
    pub fn observe(&mut self, high: f64, low: f64) -> ScanState {
        if self.state.is_terminal() {
            return self.state;
        }

        if high >= self.tp_price {
            self.state = ScanState::TpHit;
        } else if low <= self.sl_price {
            self.state = ScanState::SlHit;
        } else {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.state = ScanState::Exhausted;
            }
        }
        self.state
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Label for a finished scan.
    pub fn outcome(&self) -> Label {
        match self.state {
            ScanState::TpHit => Label::TakeProfit,
            ScanState::SlHit => Label::StopLoss,
            ScanState::Scanning | ScanState::Exhausted => Label::Unresolved,
        }
    }
}

pub struct TripleBarrierLabeler {
    config: TripleBarrierConfig,
}

impl TripleBarrierLabeler {
    pub fn new(config: TripleBarrierConfig) -> Result<Self> {
        if config.take_profit_pct <= 0.0 || config.stop_loss_pct <= 0.0 {
            return Err(CandlelabError::Configuration(
                "Barrier fractions must be positive".to_string(),
            ));
        }
        if config.lookahead_bars == 0 {
            return Err(CandlelabError::Configuration(
                "lookahead_bars must be at least 1".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Label every candle whose lookahead window fits inside the sequence.
    /// Candles whose window touched neither barrier, and trailing candles
    /// without a complete window, are dropped from the returned dataset.
    ///
    /// Indices are independent once the sequence is materialized, so the
    /// outer loop is sharded across threads; results are collected back in
    /// index order and the output is identical to a sequential pass.
    pub fn label(&self, candles: &CandleSequence) -> Dataset {
        let len = candles.len();
        let lookahead = self.config.lookahead_bars;
        let labelable = len.saturating_sub(lookahead);

        let outcomes = (0..labelable)
            .into_par_iter()
            .map(|i| {
                let entry = candles[i];
                let mut scan = BarrierScan::new(entry.close, &self.config);
                for bar in &candles.candles()[i + 1..=i + lookahead] {
                    if scan.observe(bar.high, bar.low).is_terminal() {
                        break;
                    }
                }
                (entry, scan.outcome())
            })
            .collect::<Vec<_>>();

        Dataset::from_outcomes(outcomes, len - labelable)
    }
}
