use serde::{Deserialize, Serialize};

use crate::types::Candle;

/// Outcome class for one candle.
///
/// The integer encoding is part of the outbound contract: 1 and 0 are the two
/// trainable classes, -1 is the sentinel for a lookahead window that touched
/// neither barrier. Unresolved records never reach a `Dataset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    TakeProfit = 1,
    StopLoss = 0,
    Unresolved = -1,
}

impl Label {
    /// Training class for definite outcomes, `None` for `Unresolved`.
    pub fn class(&self) -> Option<i64> {
        match self {
            Self::TakeProfit => Some(1),
            Self::StopLoss => Some(0),
            Self::Unresolved => None,
        }
    }

    /// Raw integer encoding, including the -1 sentinel.
    pub fn encode(&self) -> i64 {
        match self {
            Self::TakeProfit => 1,
            Self::StopLoss => 0,
            Self::Unresolved => -1,
        }
    }
}

/// A candle together with its resolved label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledRecord {
    pub candle: Candle,
    pub label: Label,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedHorizonConfig {
    /// How many candles ahead the reference close sits.
    pub horizon: usize,
}

impl Default for FixedHorizonConfig {
    fn default() -> Self {
        Self { horizon: 1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripleBarrierConfig {
    pub take_profit_pct: f64, // e.g., 0.005 = 0.5% above entry
    pub stop_loss_pct: f64,   // e.g., 0.003 = 0.3% below entry
    pub lookahead_bars: usize, // bar count, not a duration
}

impl Default for TripleBarrierConfig {
    fn default() -> Self {
        Self {
            take_profit_pct: 0.005,
            stop_loss_pct: 0.003,
            lookahead_bars: 10,
        }
    }
}

/// Distribution summary for one labeling run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelStats {
    /// Candles in the input sequence.
    pub total_candles: usize,
    /// Candles dropped because their lookahead window ran past the history.
    pub truncated_count: usize,
    /// Candles dropped because neither barrier was touched.
    pub unresolved_count: usize,
    pub take_profit_count: usize,
    pub stop_loss_count: usize,
    pub take_profit_pct: f64,
    pub stop_loss_pct: f64,
}

impl LabelStats {
    pub fn labeled_count(&self) -> usize {
        self.take_profit_count + self.stop_loss_count
    }
}
