use super::DEFAULT_WEIGHT;

#[derive(Debug, Clone, PartialEq)]
pub struct QuantitativeAttribute {
    pub name: String,
    pub weight: f64,
    pub values: Vec<f64>,
}

impl QuantitativeAttribute {
    pub fn new(name: String) -> QuantitativeAttribute {
        QuantitativeAttribute {
            name,
            weight: DEFAULT_WEIGHT,
            values: Vec::new(),
        }
    }

    pub fn with_values(name: String, values: Vec<f64>) -> QuantitativeAttribute {
        QuantitativeAttribute {
            name,
            weight: DEFAULT_WEIGHT,
            values,
        }
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Sample standard deviation (n - 1 denominator).
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let n = self.values.len();
        if n < 2 {
            return Some(0.0);
        }
        let ss: f64 = self.values.iter().map(|x| (x - mean).powi(2)).sum();
        Some((ss / (n - 1) as f64).sqrt())
    }
}
