use crate::core::{Dataset, DatasetError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PartitionError {
    #[error("train fraction {0} is outside [0, 1]")]
    InvalidFraction(f64),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SplitKind {
    /// First cases train, the rest test.
    #[default]
    Sequential,
    /// Seeded sampling without replacement.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    Sequential,
    Random { seed: u64 },
}

impl SplitStrategy {
    pub fn from_kind(kind: SplitKind, seed: u64) -> SplitStrategy {
        match kind {
            SplitKind::Sequential => SplitStrategy::Sequential,
            SplitKind::Random => SplitStrategy::Random { seed },
        }
    }
}

/// Disjoint training and test sets with the class labels seen across both.
#[derive(Debug, Clone)]
pub struct Partition {
    pub train: Dataset,
    pub test: Dataset,
    pub classes: Vec<String>,
}

impl Partition {
    pub fn new(train: Dataset, test: Dataset) -> Result<Partition, DatasetError> {
        let mut classes = train.classes()?;
        for label in test.classes()? {
            if !classes.contains(&label) {
                classes.push(label);
            }
        }
        Ok(Partition {
            train,
            test,
            classes,
        })
    }
}

/// Number of training cases for `fraction` of `n`, rounded down.
pub fn train_size(n: usize, fraction: f64) -> Result<usize, PartitionError> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(PartitionError::InvalidFraction(fraction));
    }
    Ok(((n as f64) * fraction).floor() as usize)
}

pub fn split(
    dataset: &Dataset,
    fraction: f64,
    strategy: SplitStrategy,
) -> Result<Partition, PartitionError> {
    match strategy {
        SplitStrategy::Sequential => split_sequential(dataset, fraction),
        SplitStrategy::Random { seed } => split_random(dataset, fraction, seed),
    }
}

/// The first `floor(n * fraction)` cases train, the remainder test.
pub fn split_sequential(dataset: &Dataset, fraction: f64) -> Result<Partition, PartitionError> {
    let n = dataset.number_of_cases();
    let cut = train_size(n, fraction)?;
    let train_rows: Vec<usize> = (0..cut).collect();
    let test_rows: Vec<usize> = (cut..n).collect();
    build(dataset, &train_rows, &test_rows)
}

/// Draws row indices uniformly with a generator seeded by `seed` until
/// `floor(n * fraction)` distinct rows are chosen for training, in draw
/// order. Unchosen rows form the test set in their original order.
pub fn split_random(dataset: &Dataset, fraction: f64, seed: u64) -> Result<Partition, PartitionError> {
    let n = dataset.number_of_cases();
    let target = train_size(n, fraction)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut chosen = vec![false; n];
    let mut train_rows = Vec::with_capacity(target);
    while train_rows.len() < target {
        let row = rng.random_range(0..n);
        if !chosen[row] {
            chosen[row] = true;
            train_rows.push(row);
        }
    }
    let test_rows: Vec<usize> = (0..n).filter(|&row| !chosen[row]).collect();
    build(dataset, &train_rows, &test_rows)
}

fn build(dataset: &Dataset, train_rows: &[usize], test_rows: &[usize]) -> Result<Partition, PartitionError> {
    // Fail before copying anything when there is no usable class column.
    dataset.class_attribute()?;

    let train = dataset.select_rows(train_rows)?;
    let test = dataset.select_rows(test_rows)?;
    log::info!(
        "split '{}' into {} training and {} test cases",
        dataset.name(),
        train.number_of_cases(),
        test.number_of_cases()
    );
    Ok(Partition::new(train, test)?)
}
