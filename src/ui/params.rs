use crate::classifiers::{KNearestNeighbors, WeightCheck};
use crate::core::{Dataset, DatasetError, Preprocessing};
use crate::splits::{SplitKind, SplitStrategy};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_SEED: u64 = 42;
const DEFAULT_K: usize = 3;
const DEFAULT_TRAIN_FRACTION: f64 = 0.7;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("k must be at least 1")]
    ZeroNeighbors,

    #[error("train_fraction {0} is outside [0, 1]")]
    InvalidTrainFraction(f64),

    #[error("weight {weight} at position {index} is outside [0, 1]")]
    InvalidWeight { index: usize, weight: f64 },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Parameters of one k-NN hold-out run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KnnParams {
    #[schemars(
        title = "Neighbors",
        description = "Number of nearest training cases that vote",
        range(min = 1)
    )]
    pub k: usize,

    #[schemars(
        title = "Train Fraction",
        description = "Share of cases assigned to the training set (0.0–1.0)",
        range(min = 0.0, max = 1.0)
    )]
    pub train_fraction: f64,

    #[schemars(title = "Split", description = "How cases are assigned to train and test")]
    pub split: SplitKind,

    #[schemars(title = "Seed", description = "PRNG seed for the random split")]
    pub seed: u64,

    #[schemars(
        title = "Weight Check",
        description = "Which attribute weights are matched against the query features"
    )]
    pub weight_check: WeightCheck,

    #[schemars(
        title = "Preprocessing",
        description = "Transform applied to the dataset before splitting"
    )]
    pub preprocessing: Preprocessing,

    #[schemars(
        title = "Weights",
        description = "Per-attribute weights in column order, class attribute included (each 0.0–1.0)"
    )]
    pub weights: Option<Vec<f64>>,
}

impl Default for KnnParams {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            train_fraction: DEFAULT_TRAIN_FRACTION,
            split: SplitKind::default(),
            seed: DEFAULT_SEED,
            weight_check: WeightCheck::FeatureWeights,
            preprocessing: Preprocessing::None,
            weights: None,
        }
    }
}

impl KnnParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.k == 0 {
            return Err(ParamsError::ZeroNeighbors);
        }
        if !(0.0..=1.0).contains(&self.train_fraction) {
            return Err(ParamsError::InvalidTrainFraction(self.train_fraction));
        }
        if let Some(weights) = &self.weights {
            if let Some((index, &weight)) = weights
                .iter()
                .enumerate()
                .find(|(_, w)| !(0.0..=1.0).contains(*w))
            {
                return Err(ParamsError::InvalidWeight { index, weight });
            }
        }
        Ok(())
    }

    pub fn classifier(&self) -> KNearestNeighbors {
        KNearestNeighbors::new(self.k).with_weight_check(self.weight_check)
    }

    pub fn strategy(&self) -> SplitStrategy {
        SplitStrategy::from_kind(self.split, self.seed)
    }

    /// Applies the configured weights, then the configured preprocessing.
    pub fn prepare(&self, mut dataset: Dataset) -> Result<Dataset, ParamsError> {
        if let Some(weights) = &self.weights {
            dataset.set_weights(weights)?;
        }
        Ok(self.preprocessing.apply(&dataset))
    }

    pub fn schema() -> Schema {
        schema_for!(KnnParams)
    }
}
