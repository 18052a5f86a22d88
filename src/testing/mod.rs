mod dummies {
    pub mod no_answer_classifier;
}
mod fixtures;
mod spies {
    pub mod classify_spy_classifier;
}
mod stubs {
    pub mod scripted_classifier;
}

pub use dummies::no_answer_classifier::NoAnswerClassifier;
pub use fixtures::two_clusters;
pub use spies::classify_spy_classifier::{ClassifySpyClassifier, ClassifySpyHandle};
pub use stubs::scripted_classifier::ScriptedClassifier;
