mod confusion;
mod report;

pub use confusion::{ClassCounts, ConfusionCounts, ConfusionMatrix};
pub use report::{AverageMetrics, ClassMetrics, ClassificationReport};
