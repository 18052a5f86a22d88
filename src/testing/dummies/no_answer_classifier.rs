use crate::classifiers::Classifier;
use crate::core::Dataset;
use crate::core::instances::Instance;

#[derive(Default)]
pub struct NoAnswerClassifier;

impl Classifier for NoAnswerClassifier {
    fn classify(&self, _training: &Dataset, _query: &Instance) -> Option<String> {
        None
    }
}
