use crate::classifiers::Classifier;
use crate::evaluation::{ClassificationReport, ConfusionCounts, ConfusionMatrix};
use crate::splits::Partition;

use cpu_time::ThreadTime;

/// Classifies every test case of a partition against its training set.
///
/// `classification_report` and `confusion_matrix` each run the full
/// prediction loop; predictions are not cached between calls.
pub struct HoldoutEvaluator {
    classifier: Box<dyn Classifier>,
    partition: Partition,
}

impl HoldoutEvaluator {
    pub fn new(classifier: Box<dyn Classifier>, partition: Partition) -> Self {
        Self {
            classifier,
            partition,
        }
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Calls `record(actual, predicted)` once per test case.
    fn for_each_prediction<F>(&self, mut record: F)
    where
        F: FnMut(&str, Option<&str>),
    {
        let train = &self.partition.train;
        let total = self.partition.test.number_of_cases();
        for (row, case) in self.partition.test.instances().enumerate() {
            let actual = case.class_label().unwrap_or_default().to_string();
            let query = case.without_class();
            let predicted = self.classifier.classify(train, &query);
            if predicted.is_none() {
                log::debug!("test case {row} could not be classified");
            }
            record(&actual, predicted.as_deref());
            if (row + 1) % 1000 == 0 {
                log::debug!("classified {} of {total} test cases", row + 1);
            }
        }
    }

    pub fn classification_report(&self) -> ClassificationReport {
        let start = ThreadTime::now();
        let mut counts = ConfusionCounts::new(&self.partition.classes);
        let (mut cases, mut correct, mut unclassified) = (0u64, 0u64, 0u64);

        self.for_each_prediction(|actual, predicted| {
            cases += 1;
            match predicted {
                Some(p) if p == actual => correct += 1,
                Some(_) => {}
                None => unclassified += 1,
            }
            counts.add(actual, predicted);
        });

        let report = ClassificationReport::new(cases, correct, unclassified, &counts)
            .with_seconds(start.elapsed().as_secs_f64());
        log::info!(
            "evaluated {} test cases, accuracy {:.4}",
            report.cases,
            report.accuracy
        );
        report
    }

    pub fn confusion_matrix(&self) -> ConfusionMatrix {
        let mut matrix = ConfusionMatrix::new(&self.partition.classes);
        self.for_each_prediction(|actual, predicted| matrix.add(actual, predicted));
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{KNearestNeighbors, WeightCheck};
    use crate::core::Dataset;
    use crate::core::attributes::Attribute;
    use crate::splits::{split_sequential, split_random};
    use crate::testing::{
        ClassifySpyClassifier, NoAnswerClassifier, ScriptedClassifier, two_clusters,
    };

    fn knn(k: usize) -> Box<dyn Classifier> {
        Box::new(KNearestNeighbors::new(k).with_weight_check(WeightCheck::FeatureWeights))
    }

    #[test]
    fn separable_clusters_are_classified_perfectly() {
        let partition = split_random(&two_clusters(), 0.6, 11).unwrap();
        let ev = HoldoutEvaluator::new(knn(3), partition);

        let report = ev.classification_report();
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.unclassified, 0);
        assert!(report.classes.iter().filter(|c| c.support > 0).all(|c| c.f1 == 1.0));

        let m = ev.confusion_matrix();
        assert!(m.is_diagonal());
        assert_eq!(m.correct(), report.cases);
        assert_eq!(m.labels(), &["left".to_string(), "right".to_string()]);
    }

    #[test]
    fn empty_test_set_reports_nan_accuracy() {
        let partition = split_sequential(&two_clusters(), 1.0).unwrap();
        let ev = HoldoutEvaluator::new(knn(1), partition);
        let report = ev.classification_report();
        assert_eq!(report.cases, 0);
        assert!(report.accuracy.is_nan());
        assert_eq!(ev.confusion_matrix().total(), 0);
    }

    #[test]
    fn empty_training_set_leaves_everything_unclassified() {
        let partition = split_sequential(&two_clusters(), 0.0).unwrap();
        let cases = partition.test.number_of_cases() as u64;
        let ev = HoldoutEvaluator::new(knn(1), partition);

        let report = ev.classification_report();
        assert_eq!(report.unclassified, cases);
        assert_eq!(report.accuracy, 0.0);
        assert!(report.classes.iter().all(|c| c.counts.fp == 0));
        assert_eq!(ev.confusion_matrix().unclassified(), cases);
    }

    #[test]
    fn no_answer_counts_as_false_negative_only() {
        let partition = split_sequential(&two_clusters(), 0.5).unwrap();
        let ev = HoldoutEvaluator::new(Box::new(NoAnswerClassifier), partition);
        let report = ev.classification_report();
        for c in &report.classes {
            assert_eq!(c.counts.tp, 0);
            assert_eq!(c.counts.fp, 0);
            assert_eq!(c.counts.fn_, c.support);
        }
    }

    #[test]
    fn scripted_predictions_fill_matrix_cells() {
        let ds = Dataset::new(
            "four",
            vec![
                Attribute::quantitative("x", vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]),
                Attribute::qualitative("class", vec!["a", "b", "a", "a", "b", "b"]),
            ],
        )
        .unwrap();
        let partition = split_sequential(&ds, 0.34).unwrap();
        let script = ["a", "b", "a", "b"];

        let ev = HoldoutEvaluator::new(Box::new(ScriptedClassifier::new(&script)), partition.clone());
        let m = ev.confusion_matrix();
        // actual: a a b b
        assert_eq!(m.get("a", "a"), Some(1));
        assert_eq!(m.get("a", "b"), Some(1));
        assert_eq!(m.get("b", "a"), Some(1));
        assert_eq!(m.get("b", "b"), Some(1));

        let ev = HoldoutEvaluator::new(Box::new(ScriptedClassifier::new(&script)), partition);
        let report = ev.classification_report();
        assert_eq!(report.correct, 2);
        assert_eq!(report.accuracy, 0.5);
    }

    #[test]
    fn qualitative_feature_column_does_not_block_classification() {
        let ds = Dataset::new(
            "mixed",
            vec![
                Attribute::quantitative("x", vec![0.0, 10.0, 0.2, 10.2, 0.1, 10.1]),
                Attribute::qualitative("color", vec!["red", "red", "blue", "blue", "red", "blue"]),
                Attribute::quantitative("y", vec![0.0, 10.0, 0.1, 10.1, 0.3, 10.3]),
                Attribute::qualitative("class", vec!["lo", "hi", "lo", "hi", "lo", "hi"]),
            ],
        )
        .unwrap();
        let partition = split_sequential(&ds, 0.67).unwrap();
        assert_eq!(partition.test.number_of_cases(), 2);
        let ev = HoldoutEvaluator::new(knn(1), partition);

        let report = ev.classification_report();
        assert_eq!(report.unclassified, 0);
        assert_eq!(report.accuracy, 1.0);
        assert!(ev.confusion_matrix().is_diagonal());
    }

    #[test]
    fn each_entry_point_reruns_classification() {
        let partition = split_sequential(&two_clusters(), 0.5).unwrap();
        let cases = partition.test.number_of_cases() as u64;
        let (spy, handle) = ClassifySpyClassifier::new();
        let ev = HoldoutEvaluator::new(Box::new(spy), partition);

        let _ = ev.classification_report();
        assert_eq!(handle.count(), cases);
        let _ = ev.confusion_matrix();
        assert_eq!(handle.count(), 2 * cases);
    }

    #[test]
    fn queries_carry_no_class_label() {
        let partition = split_sequential(&two_clusters(), 0.5).unwrap();
        let (spy, handle) = ClassifySpyClassifier::new();
        let ev = HoldoutEvaluator::new(Box::new(spy), partition);
        let _ = ev.confusion_matrix();
        assert!(handle.saw_only_unlabeled_queries());
    }
}
