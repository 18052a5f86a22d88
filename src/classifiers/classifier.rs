use crate::core::Dataset;
use crate::core::instances::Instance;

pub trait Classifier {
    /// Predicts the class label of `query` from `training`.
    /// `None` means no classification was possible.
    fn classify(&self, training: &Dataset, query: &Instance) -> Option<String>;
}
