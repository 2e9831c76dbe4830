use super::config::{Label, LabelStats, LabeledRecord};
use crate::error::Result;
use crate::types::Candle;
use polars::prelude::*;

/// Final labeled dataset. Every record carries a definite label (1 or 0);
/// unresolved and truncated candles were filtered out during construction, so
/// downstream consumers never see the -1 sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<LabeledRecord>,
    stats: LabelStats,
}

impl Dataset {
    /// Assemble a dataset from per-candle outcomes in index order.
    /// `truncated_count` is the number of trailing candles whose lookahead
    /// window ran past the fetched history.
    pub(super) fn from_outcomes(outcomes: Vec<(Candle, Label)>, truncated_count: usize) -> Self {
        let mut stats = LabelStats {
            total_candles: outcomes.len() + truncated_count,
            truncated_count,
            ..LabelStats::default()
        };

        let mut records = Vec::with_capacity(outcomes.len());
        for (candle, label) in outcomes {
            match label {
                Label::TakeProfit => {
                    stats.take_profit_count += 1;
                    records.push(LabeledRecord { candle, label });
                }
                Label::StopLoss => {
                    stats.stop_loss_count += 1;
                    records.push(LabeledRecord { candle, label });
                }
                Label::Unresolved => {
                    stats.unresolved_count += 1;
                }
            }
        }

        let labeled = stats.labeled_count();
        if labeled > 0 {
            stats.take_profit_pct = (stats.take_profit_count as f64 / labeled as f64) * 100.0;
            stats.stop_loss_pct = (stats.stop_loss_count as f64 / labeled as f64) * 100.0;
        }

        Self { records, stats }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LabeledRecord] {
        &self.records
    }

    pub fn stats(&self) -> &LabelStats {
        &self.stats
    }

    /// Tabular form: OHLCV columns plus a `target` column that only ever
    /// holds 0 or 1.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut targets = Vec::with_capacity(self.records.len());
        for record in &self.records {
            // By construction every record has a definite class.
            targets.push(record.label.encode());
        }

        let df = df! {
            "timestamp" => self.records.iter().map(|r| r.candle.timestamp).collect::<Vec<i64>>(),
            "open" => self.records.iter().map(|r| r.candle.open).collect::<Vec<f64>>(),
            "high" => self.records.iter().map(|r| r.candle.high).collect::<Vec<f64>>(),
            "low" => self.records.iter().map(|r| r.candle.low).collect::<Vec<f64>>(),
            "close" => self.records.iter().map(|r| r.candle.close).collect::<Vec<f64>>(),
            "volume" => self.records.iter().map(|r| r.candle.volume).collect::<Vec<f64>>(),
            "target" => targets,
        }?;
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(ts: i64, close: f64) -> Candle {
        Candle {
            timestamp: ts,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }

    #[test]
    fn test_unresolved_filtered_before_consumers() {
        let outcomes = vec![
            (candle(0, 100.0), Label::TakeProfit),
            (candle(1, 100.0), Label::Unresolved),
            (candle(2, 100.0), Label::StopLoss),
        ];
        let dataset = Dataset::from_outcomes(outcomes, 2);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.stats().unresolved_count, 1);
        assert_eq!(dataset.stats().truncated_count, 2);
        assert_eq!(dataset.stats().total_candles, 5);

        let df = dataset.to_dataframe().unwrap();
        let target = df.column("target").unwrap().i64().unwrap();
        for i in 0..df.height() {
            let t = target.get(i).unwrap();
            assert!(t == 0 || t == 1);
        }
    }

    #[test]
    fn test_stats_percentages() {
        let outcomes = vec![
            (candle(0, 100.0), Label::TakeProfit),
            (candle(1, 100.0), Label::TakeProfit),
            (candle(2, 100.0), Label::TakeProfit),
            (candle(3, 100.0), Label::StopLoss),
        ];
        let dataset = Dataset::from_outcomes(outcomes, 0);
        assert_eq!(dataset.stats().take_profit_pct, 75.0);
        assert_eq!(dataset.stats().stop_loss_pct, 25.0);
    }

    #[test]
    fn test_empty_dataset_is_not_an_error() {
        let dataset = Dataset::from_outcomes(Vec::new(), 0);
        assert!(dataset.is_empty());
        assert_eq!(dataset.to_dataframe().unwrap().height(), 0);
    }
}
