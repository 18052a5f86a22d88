use crate::classifiers::Classifier;
use crate::core::Dataset;
use crate::core::instances::Instance;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

pub struct ClassifySpyHandle {
    calls: Arc<AtomicU64>,
    labeled_query_seen: Arc<AtomicBool>,
}

impl ClassifySpyHandle {
    pub fn count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn saw_only_unlabeled_queries(&self) -> bool {
        !self.labeled_query_seen.load(Ordering::Relaxed)
    }
}

/// Counts calls and answers with the first training label.
pub struct ClassifySpyClassifier {
    calls: Arc<AtomicU64>,
    labeled_query_seen: Arc<AtomicBool>,
}

impl ClassifySpyClassifier {
    pub fn new() -> (Self, ClassifySpyHandle) {
        let calls = Arc::new(AtomicU64::new(0));
        let labeled = Arc::new(AtomicBool::new(false));
        (
            Self {
                calls: calls.clone(),
                labeled_query_seen: labeled.clone(),
            },
            ClassifySpyHandle {
                calls,
                labeled_query_seen: labeled,
            },
        )
    }
}

impl Classifier for ClassifySpyClassifier {
    fn classify(&self, training: &Dataset, query: &Instance) -> Option<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if query.class_label().is_some() {
            self.labeled_query_seen.store(true, Ordering::Relaxed);
        }
        training.instance(0)?.class_label().map(str::to_string)
    }
}
