use super::confusion::{ClassCounts, ConfusionCounts};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: u64,
    pub counts: ClassCounts,
}

impl ClassMetrics {
    pub fn from_counts(label: &str, counts: ClassCounts) -> Self {
        let precision = ratio(counts.tp, counts.tp + counts.fp);
        let recall = ratio(counts.tp, counts.tp + counts.fn_);
        let f1 = if precision == 0.0 || recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        Self {
            label: label.to_string(),
            precision,
            recall,
            f1,
            support: counts.support(),
            counts,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl AverageMetrics {
    /// Unweighted mean over classes; zero when there are none.
    pub fn macro_average(classes: &[ClassMetrics]) -> Self {
        if classes.is_empty() {
            return Self::default();
        }
        let n = classes.len() as f64;
        Self {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / n,
        }
    }

    /// Mean weighted by class support; zero when total support is zero.
    pub fn weighted_average(classes: &[ClassMetrics]) -> Self {
        let total: u64 = classes.iter().map(|c| c.support).sum();
        if total == 0 {
            return Self::default();
        }
        let total = total as f64;
        let weigh = |f: fn(&ClassMetrics) -> f64| {
            classes.iter().map(|c| f(c) * c.support as f64).sum::<f64>() / total
        };
        Self {
            precision: weigh(|c| c.precision),
            recall: weigh(|c| c.recall),
            f1: weigh(|c| c.f1),
        }
    }
}

/// Accuracy and per-class metrics of one hold-out run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub cases: u64,
    pub correct: u64,
    pub unclassified: u64,
    /// `correct / cases`; NaN when there were no test cases.
    pub accuracy: f64,
    pub classes: Vec<ClassMetrics>,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
    /// CPU seconds spent classifying.
    pub seconds: f64,
}

impl ClassificationReport {
    pub fn new(cases: u64, correct: u64, unclassified: u64, counts: &ConfusionCounts) -> Self {
        let classes: Vec<ClassMetrics> = counts
            .iter()
            .map(|(label, c)| ClassMetrics::from_counts(label, c))
            .collect();
        Self {
            cases,
            correct,
            unclassified,
            accuracy: correct as f64 / cases as f64,
            macro_avg: AverageMetrics::macro_average(&classes),
            weighted_avg: AverageMetrics::weighted_average(&classes),
            classes,
            seconds: 0.0,
        }
    }

    pub fn with_seconds(mut self, seconds: f64) -> Self {
        self.seconds = seconds;
        self
    }

    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.classes.iter().find(|c| c.label == label)
    }

    #[inline]
    fn fmtv(v: f64) -> String {
        if v.is_nan() {
            "NaN".into()
        } else {
            format!("{:.4}", v)
        }
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl Display for ClassificationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(
            f,
            "cases={}, correct={}, unclassified={}, acc={}, t={:.6}s",
            self.cases,
            self.correct,
            self.unclassified,
            Self::fmtv(self.accuracy),
            self.seconds
        )?;

        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .max()
            .unwrap_or(0)
            .max("weighted avg".len());

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1", "support"
        )?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>9} {:>9} {:>9} {:>9}",
                c.label,
                Self::fmtv(c.precision),
                Self::fmtv(c.recall),
                Self::fmtv(c.f1),
                c.support
            )?;
        }

        let support: u64 = self.classes.iter().map(|c| c.support).sum();
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$} {:>9} {:>9} {:>9} {:>9}",
                name,
                Self::fmtv(avg.precision),
                Self::fmtv(avg.recall),
                Self::fmtv(avg.f1),
                support
            )?;
        }
        Ok(())
    }
}
