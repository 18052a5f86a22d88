use super::distance::weighted_squared_distance;
use super::neighborhood::{Neighbor, Neighborhood};
use crate::classifiers::classifier::Classifier;
use crate::core::Dataset;
use crate::core::instances::Instance;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Which weights are compared against, and fed with, the query features.
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
pub enum WeightCheck {
    /// The full weight vector, class weight included, must match the query
    /// feature count. With a trailing class attribute the two differ by one,
    /// so every training case is skipped.
    #[default]
    Literal,
    /// Only the weights of non-class quantitative attributes, which line up
    /// with the feature vector.
    FeatureWeights,
}

/// Outcome of a successful classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    /// Retained neighbors by ascending distance.
    pub neighbors: Vec<Neighbor>,
}

/// Majority vote among the `k` training cases nearest to the query under
/// the dataset's attribute-weighted squared distance.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    k: usize,
    weight_check: WeightCheck,
}

impl KNearestNeighbors {
    /// `k == 0` is accepted; such a classifier never produces a label.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            weight_check: WeightCheck::default(),
        }
    }

    pub fn with_weight_check(mut self, weight_check: WeightCheck) -> Self {
        self.weight_check = weight_check;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn weight_check(&self) -> WeightCheck {
        self.weight_check
    }

    /// Scans `training` and returns the winning label with its neighbors,
    /// or `None` when nothing could be classified. A training set without a
    /// qualitative class attribute is rejected up front.
    pub fn classify_detailed(&self, training: &Dataset, query: &Instance) -> Option<Classification> {
        if let Err(e) = training.class_attribute() {
            log::warn!("cannot classify against '{}': {e}", training.name());
            return None;
        }
        if training.number_of_cases() == 0 {
            log::debug!("empty training set, nothing to classify against");
            return None;
        }
        let query_features = query.feature_vector()?;

        let weights = match self.weight_check {
            WeightCheck::Literal => training.weights(),
            WeightCheck::FeatureWeights => training.numeric_feature_weights(),
        };

        let mut neighborhood = Neighborhood::new(self.k);
        let mut skipped = 0usize;

        for (row, case) in training.instances().enumerate() {
            let Some(features) = case.feature_vector() else {
                skipped += 1;
                continue;
            };

            if weights.len() != query_features.len() {
                log::debug!(
                    "skipping training case {row}: {} weights for {} query features",
                    weights.len(),
                    query_features.len()
                );
                skipped += 1;
                continue;
            }

            let distance = match weighted_squared_distance(&query_features, &features, &weights) {
                Ok(d) => d,
                Err(e) => {
                    log::debug!("skipping training case {row}: {e}");
                    skipped += 1;
                    continue;
                }
            };

            let Some(label) = case.class_label() else {
                skipped += 1;
                continue;
            };
            neighborhood.offer(Neighbor::new(distance, label));
        }

        if skipped > 0 {
            log::warn!(
                "{skipped} of {} training cases skipped",
                training.number_of_cases()
            );
        }

        let neighbors = neighborhood.into_sorted_vec();
        let label = majority_label(&neighbors)?;
        Some(Classification { label, neighbors })
    }
}

/// Most frequent label. Labels are tallied in neighbor order, so a tie goes
/// to the tied label with the closest neighbor.
fn majority_label(neighbors: &[Neighbor]) -> Option<String> {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for n in neighbors {
        match tally.iter_mut().find(|(label, _)| *label == n.label) {
            Some((_, count)) => *count += 1,
            None => tally.push((n.label.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in tally {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.to_string())
}

impl Classifier for KNearestNeighbors {
    fn classify(&self, training: &Dataset, query: &Instance) -> Option<String> {
        self.classify_detailed(training, query).map(|c| c.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::Attribute;

    fn diagonal() -> Dataset {
        Dataset::new(
            "diagonal",
            vec![
                Attribute::quantitative("x", vec![1.0, 2.0, 3.0]),
                Attribute::quantitative("y", vec![1.0, 2.0, 3.0]),
                Attribute::qualitative("class", vec!["A", "B", "C"]),
            ],
        )
        .unwrap()
    }

    fn query(values: &[f64]) -> Instance {
        Instance::new(values.iter().map(|&x| x.into()).collect())
    }

    fn knn(k: usize) -> KNearestNeighbors {
        KNearestNeighbors::new(k).with_weight_check(WeightCheck::FeatureWeights)
    }

    #[test]
    fn exact_match_with_k1() {
        let c = knn(1).classify_detailed(&diagonal(), &query(&[1.0, 1.0])).unwrap();
        assert_eq!(c.label, "A");
        assert_eq!(c.neighbors, vec![Neighbor::new(0.0, "A")]);
    }

    #[test]
    fn three_way_tie_goes_to_nearest() {
        let c = knn(3).classify_detailed(&diagonal(), &query(&[1.1, 1.1])).unwrap();
        assert_eq!(c.neighbors.len(), 3);
        let labels: Vec<&str> = c.neighbors.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert_eq!(c.label, "A");
    }

    #[test]
    fn majority_beats_nearest() {
        let training = Dataset::new(
            "t",
            vec![
                Attribute::quantitative("x", vec![0.0, 1.0, 1.2, 5.0]),
                Attribute::qualitative("class", vec!["near", "far", "far", "near"]),
            ],
        )
        .unwrap();
        assert_eq!(knn(3).classify(&training, &query(&[0.1])), Some("far".into()));
        assert_eq!(knn(1).classify(&training, &query(&[0.1])), Some("near".into()));
    }

    #[test]
    fn single_class_always_wins() {
        let training = Dataset::new(
            "mono",
            vec![
                Attribute::quantitative("x", vec![-3.0, 0.0, 8.0, 2.5]),
                Attribute::qualitative("class", vec!["only"; 4]),
            ],
        )
        .unwrap();
        for k in 1..=6 {
            for q in [-100.0, 0.0, 4.2, 1e6] {
                assert_eq!(knn(k).classify(&training, &query(&[q])), Some("only".into()));
            }
        }
    }

    #[test]
    fn attribute_weights_change_the_winner() {
        let mut training = Dataset::new(
            "w",
            vec![
                Attribute::quantitative("x", vec![0.0, 10.0]),
                Attribute::quantitative("y", vec![10.0, 0.0]),
                Attribute::qualitative("class", vec!["P", "Q"]),
            ],
        )
        .unwrap();
        let q = query(&[1.0, 2.0]);
        assert_eq!(knn(1).classify(&training, &q), Some("P".into()));

        training.set_weight(0, 1.0).unwrap();
        training.set_weight(1, 0.0).unwrap();
        assert_eq!(knn(1).classify(&training, &q), Some("P".into()));

        training.set_weight(0, 0.0).unwrap();
        training.set_weight(1, 1.0).unwrap();
        assert_eq!(knn(1).classify(&training, &q), Some("Q".into()));
    }

    #[test]
    fn empty_training_set_yields_none() {
        let empty = diagonal().empty_like();
        assert_eq!(knn(1).classify(&empty, &query(&[1.0, 1.0])), None);
    }

    #[test]
    fn query_without_values_yields_none() {
        assert_eq!(knn(1).classify(&diagonal(), &Instance::default()), None);
    }

    #[test]
    fn zero_k_yields_none() {
        assert_eq!(knn(0).classify(&diagonal(), &query(&[1.0, 1.0])), None);
    }

    #[test]
    fn literal_check_skips_every_case_on_standard_schema() {
        let c = KNearestNeighbors::new(1);
        assert_eq!(c.weight_check(), WeightCheck::Literal);
        assert_eq!(c.classify(&diagonal(), &query(&[1.0, 1.0])), None);
    }

    #[test]
    fn literal_check_can_pass_yet_metric_rejects() {
        // The query carries one extra feature, matching the class weight slot.
        let training = Dataset::new(
            "t",
            vec![
                Attribute::quantitative("x", vec![0.0, 4.0]),
                Attribute::qualitative("class", vec!["lo", "hi"]),
            ],
        )
        .unwrap();
        let c = KNearestNeighbors::new(1).classify_detailed(&training, &query(&[3.0, 0.0]));
        // Training features have one element, weights two: the metric rejects it.
        assert_eq!(c, None);
    }

    #[test]
    fn query_arity_must_match_features() {
        let training = Dataset::new(
            "mixed",
            vec![
                Attribute::quantitative("x", vec![1.0, 2.0]),
                Attribute::qualitative("class", vec!["A", "B"]),
            ],
        )
        .unwrap();
        let c = knn(5).classify_detailed(&training, &query(&[1.9])).unwrap();
        assert_eq!(c.label, "B");
        assert_eq!(c.neighbors.len(), 2);

        let wrong_arity = query(&[1.0, 1.0]);
        assert_eq!(knn(5).classify(&training, &wrong_arity), None);
    }

    #[test]
    fn qualitative_feature_columns_are_left_out_of_the_metric() {
        let mut training = Dataset::new(
            "mixed",
            vec![
                Attribute::quantitative("x", vec![1.0, 5.0, 9.0]),
                Attribute::qualitative("color", vec!["red", "blue", "red"]),
                Attribute::quantitative("y", vec![1.0, 5.0, 9.0]),
                Attribute::qualitative("class", vec!["A", "B", "C"]),
            ],
        )
        .unwrap();
        let q = training.instance(0).unwrap().without_class();
        let c = knn(1).classify_detailed(&training, &q).unwrap();
        assert_eq!(c.label, "A");
        assert_eq!(c.neighbors, vec![Neighbor::new(0.0, "A")]);

        // The color weight must not leak into the distance.
        training.set_weights(&[0.0, 1.0, 1.0, 1.0]).unwrap();
        let c = knn(1).classify_detailed(&training, &query(&[9.0, 4.5])).unwrap();
        assert_eq!(c.label, "B");
        assert_eq!(c.neighbors[0].distance, 0.25);
    }

    #[test]
    fn numeric_class_attribute_is_rejected() {
        let training = Dataset::new(
            "no_class",
            vec![
                Attribute::quantitative("x", vec![0.0, 1.0]),
                Attribute::quantitative("y", vec![0.0, 1.0]),
            ],
        )
        .unwrap();
        let q = query(&[0.0, 0.0]);
        assert_eq!(KNearestNeighbors::new(1).classify(&training, &q), None);
        assert_eq!(knn(1).classify(&training, &q), None);
        assert_eq!(knn(1).classify(&training, &query(&[0.0])), None);
    }

    #[test]
    fn tally_prefers_first_label_on_equal_counts() {
        let n = vec![
            Neighbor::new(0.1, "x"),
            Neighbor::new(0.2, "y"),
            Neighbor::new(0.3, "y"),
            Neighbor::new(0.4, "x"),
        ];
        assert_eq!(majority_label(&n), Some("x".into()));
        assert_eq!(majority_label(&[]), None);
    }
}
