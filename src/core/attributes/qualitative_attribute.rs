use super::DEFAULT_WEIGHT;

#[derive(Debug, Clone, PartialEq)]
pub struct QualitativeAttribute {
    pub name: String,
    pub weight: f64,
    pub values: Vec<String>,
}

impl QualitativeAttribute {
    pub fn new(name: String) -> QualitativeAttribute {
        QualitativeAttribute {
            name,
            weight: DEFAULT_WEIGHT,
            values: Vec::new(),
        }
    }

    pub fn with_values(name: String, values: Vec<String>) -> QualitativeAttribute {
        QualitativeAttribute {
            name,
            weight: DEFAULT_WEIGHT,
            values,
        }
    }

    /// Distinct labels in first-seen order.
    pub fn distinct_labels(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for v in &self.values {
            if !out.contains(v) {
                out.push(v.clone());
            }
        }
        out
    }

    /// Relative frequency of each distinct label, in first-seen order.
    pub fn frequencies(&self) -> Vec<(String, f64)> {
        let total = self.values.len() as f64;
        self.distinct_labels()
            .into_iter()
            .map(|label| {
                let count = self.values.iter().filter(|v| **v == label).count();
                (label, count as f64 / total)
            })
            .collect()
    }

    pub fn index_of_value(&self, v: &str) -> Option<usize> {
        self.distinct_labels().iter().position(|x| x == v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(values: &[&str]) -> QualitativeAttribute {
        QualitativeAttribute::with_values(
            "class".into(),
            values.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn distinct_labels_keep_first_seen_order() {
        let a = attr(&["b", "a", "b", "c", "a"]);
        assert_eq!(a.distinct_labels(), vec!["b", "a", "c"]);
        assert_eq!(a.index_of_value("c"), Some(2));
        assert_eq!(a.index_of_value("z"), None);
    }

    #[test]
    fn frequencies_sum_to_one() {
        let a = attr(&["x", "y", "x", "x"]);
        let f = a.frequencies();
        assert_eq!(f, vec![("x".to_string(), 0.75), ("y".to_string(), 0.25)]);
        let total: f64 = f.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_column_has_no_frequencies() {
        assert!(attr(&[]).frequencies().is_empty());
    }
}
