use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::core::error::RadioError;

/// Random selection among a fixed set of outcomes, each with its own
/// probability weight. Weights need not sum to one.
#[derive(Debug, Clone)]
pub struct WeightedChoice<T> {
    outcomes: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Copy> WeightedChoice<T> {
    pub fn new(name: &str, pairs: &[(T, f64)]) -> Result<Self, RadioError> {
        let index = WeightedIndex::new(pairs.iter().map(|(_, w)| *w)).map_err(|e| {
            RadioError::InvalidWeights {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            outcomes: pairs.iter().map(|(o, _)| *o).collect(),
            index,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.outcomes[self.index.sample(rng)]
    }
}
