use super::traits::ConfigSection;
use crate::error::CandlelabError;
use crate::ml::labeling::{FixedHorizonConfig, TripleBarrierConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelingMethod {
    FixedHorizon,
    TripleBarrier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelingSection {
    pub method: LabelingMethod,
    pub fixed_horizon: FixedHorizonConfig,
    pub triple_barrier: TripleBarrierConfig,
}

impl Default for LabelingSection {
    fn default() -> Self {
        Self {
            method: LabelingMethod::TripleBarrier,
            fixed_horizon: FixedHorizonConfig::default(),
            triple_barrier: TripleBarrierConfig::default(),
        }
    }
}

impl ConfigSection for LabelingSection {
    fn section_name() -> &'static str {
        "labeling"
    }

    fn validate(&self) -> Result<(), CandlelabError> {
        if self.fixed_horizon.horizon == 0 {
            return Err(CandlelabError::Configuration(
                "fixed_horizon.horizon must be at least 1".to_string(),
            ));
        }
        if self.triple_barrier.take_profit_pct <= 0.0 || self.triple_barrier.stop_loss_pct <= 0.0 {
            return Err(CandlelabError::Configuration(
                "triple_barrier barrier fractions must be positive".to_string(),
            ));
        }
        if self.triple_barrier.lookahead_bars == 0 {
            return Err(CandlelabError::Configuration(
                "triple_barrier.lookahead_bars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
