use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// True positive, false positive and false negative counts for one class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub tp: u64,
    pub fp: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
}

impl ClassCounts {
    pub fn support(&self) -> u64 {
        self.tp + self.fn_
    }
}

/// Per-class TP/FP/FN, indexed like the class label list.
#[derive(Debug, Clone)]
pub struct ConfusionCounts {
    labels: Vec<String>,
    counts: Vec<ClassCounts>,
}

impl ConfusionCounts {
    pub fn new(labels: &[String]) -> Self {
        Self {
            labels: labels.to_vec(),
            counts: vec![ClassCounts::default(); labels.len()],
        }
    }

    /// Records one prediction. `None` counts only as a miss for `actual`.
    pub fn add(&mut self, actual: &str, predicted: Option<&str>) {
        for (label, counts) in self.labels.iter().zip(self.counts.iter_mut()) {
            let is_actual = label == actual;
            let is_predicted = predicted == Some(label.as_str());
            match (is_actual, is_predicted) {
                (true, true) => counts.tp += 1,
                (false, true) => counts.fp += 1,
                (true, false) => counts.fn_ += 1,
                (false, false) => {}
            }
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, label: &str) -> Option<ClassCounts> {
        let i = self.labels.iter().position(|l| l == label)?;
        Some(self.counts[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ClassCounts)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }
}

/// Square count table, rows = actual class, columns = predicted class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    cells: Vec<Vec<u64>>,
    /// Cases with no prediction, or with a label outside `labels`.
    unclassified: u64,
}

impl ConfusionMatrix {
    pub fn new(labels: &[String]) -> Self {
        let n = labels.len();
        Self {
            labels: labels.to_vec(),
            cells: vec![vec![0; n]; n],
            unclassified: 0,
        }
    }

    pub fn add(&mut self, actual: &str, predicted: Option<&str>) {
        let row = self.index_of(actual);
        let col = predicted.and_then(|p| self.index_of(p));
        match (row, col) {
            (Some(r), Some(c)) => self.cells[r][c] += 1,
            _ => {
                log::debug!("case with actual '{actual}' and prediction {predicted:?} left out of the matrix");
                self.unclassified += 1;
            }
        }
    }

    fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, actual: &str, predicted: &str) -> Option<u64> {
        Some(self.cells[self.index_of(actual)?][self.index_of(predicted)?])
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.cells
    }

    pub fn unclassified(&self) -> u64 {
        self.unclassified
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum::<u64>() + self.unclassified
    }

    pub fn correct(&self) -> u64 {
        (0..self.labels.len()).map(|i| self.cells[i][i]).sum()
    }

    pub fn is_diagonal(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(r, row)| row.iter().enumerate().all(|(c, &v)| r == c || v == 0))
    }
}

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let width = self
            .labels
            .iter()
            .map(String::len)
            .chain(self.cells.iter().flatten().map(|v| v.to_string().len()))
            .max()
            .unwrap_or(1)
            .max("actual\\pred".len());

        write!(f, "{:>width$}", "actual\\pred")?;
        for label in &self.labels {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f)?;

        for (label, row) in self.labels.iter().zip(&self.cells) {
            write!(f, "{label:>width$}")?;
            for v in row {
                write!(f, " {v:>width$}")?;
            }
            writeln!(f)?;
        }

        if self.unclassified > 0 {
            writeln!(f, "unclassified: {}", self.unclassified)?;
        }
        Ok(())
    }
}
