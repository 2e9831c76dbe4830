mod config;
mod dataset;
mod fixed_horizon;
mod triple_barrier;

pub use config::{
    FixedHorizonConfig, Label, LabelStats, LabeledRecord, TripleBarrierConfig,
};
pub use dataset::Dataset;
pub use fixed_horizon::FixedHorizonLabeler;
pub use triple_barrier::{BarrierScan, ScanState, TripleBarrierLabeler};

use crate::config::{LabelingMethod, LabelingSection};
use crate::error::Result;
use crate::types::CandleSequence;

/// Run the configured labeling strategy over a fully materialized sequence.
/// Labeling itself never fails; the only error surface is a bad parameter
/// set, reported before the pass starts.
pub fn generate(candles: &CandleSequence, config: &LabelingSection) -> Result<Dataset> {
    let dataset = match config.method {
        LabelingMethod::FixedHorizon => {
            FixedHorizonLabeler::new(config.fixed_horizon.clone())?.label(candles)
        }
        LabelingMethod::TripleBarrier => {
            TripleBarrierLabeler::new(config.triple_barrier.clone())?.label(candles)
        }
    };

    let stats = dataset.stats();
    log::info!(
        "Labeled {} of {} candles ({} unresolved, {} truncated, {:.1}% take-profit)",
        stats.labeled_count(),
        stats.total_candles,
        stats.unresolved_count,
        stats.truncated_count,
        stats.take_profit_pct,
    );

    Ok(dataset)
}
