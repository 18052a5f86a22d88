use super::Value;

/// One row of a dataset. For dataset rows the last value is the class label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Instance {
    values: Vec<Value>,
}

impl Instance {
    pub fn new(values: Vec<Value>) -> Instance {
        Instance { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn number_of_values(&self) -> usize {
        self.values.len()
    }

    pub fn value_at_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// The trailing label, if the row ends with one.
    pub fn class_label(&self) -> Option<&str> {
        self.values.last().and_then(Value::as_label)
    }

    /// Numeric values preceding the class label.
    ///
    /// The trailing element is left out when it is a label; labels found
    /// earlier in the row are skipped. `None` for a row without values.
    pub fn feature_vector(&self) -> Option<Vec<f64>> {
        let (last, prefix) = self.values.split_last()?;
        let mut features: Vec<f64> = prefix.iter().filter_map(Value::as_number).collect();
        if let Value::Number(x) = last {
            features.push(*x);
        }
        Some(features)
    }

    /// Query form of the row: every value except a trailing class label.
    pub fn without_class(&self) -> Instance {
        let end = match self.values.last() {
            Some(Value::Label(_)) => self.values.len() - 1,
            _ => self.values.len(),
        };
        Instance::new(self.values[..end].to_vec())
    }

    /// Applies `f` to every numeric value, returning a new row. Labels,
    /// the class label included, are preserved.
    pub fn map_numbers<F>(&self, mut f: F) -> Instance
    where
        F: FnMut(usize, f64) -> f64,
    {
        let values = self
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                Value::Number(x) => Value::Number(f(i, *x)),
                Value::Label(s) => Value::Label(s.clone()),
            })
            .collect();
        Instance::new(values)
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.values.clone()
    }
}

impl From<Vec<Value>> for Instance {
    fn from(values: Vec<Value>) -> Self {
        Instance::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: Vec<Value>) -> Instance {
        Instance::new(values)
    }

    #[test]
    fn feature_vector_drops_trailing_label() {
        let inst = row(vec![1.0.into(), 2.5.into(), "yes".into()]);
        assert_eq!(inst.feature_vector(), Some(vec![1.0, 2.5]));
        assert_eq!(inst.class_label(), Some("yes"));
    }

    #[test]
    fn feature_vector_skips_labels_in_prefix() {
        let inst = row(vec![1.0.into(), "red".into(), 3.0.into(), "no".into()]);
        assert_eq!(inst.feature_vector(), Some(vec![1.0, 3.0]));
    }

    #[test]
    fn feature_vector_of_query_keeps_every_number() {
        let inst = row(vec![1.0.into(), 2.0.into()]);
        assert_eq!(inst.feature_vector(), Some(vec![1.0, 2.0]));
        assert_eq!(inst.class_label(), None);
    }

    #[test]
    fn empty_row_has_no_feature_vector() {
        assert_eq!(Instance::default().feature_vector(), None);
    }

    #[test]
    fn without_class_strips_only_the_label() {
        let inst = row(vec![1.0.into(), 2.0.into(), "A".into()]);
        let query = inst.without_class();
        assert_eq!(query.values(), &[Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(query.without_class(), query);
    }

    #[test]
    fn map_numbers_preserves_label() {
        let inst = row(vec![1.0.into(), 4.0.into(), "A".into()]);
        let doubled = inst.map_numbers(|_, x| x * 2.0);
        assert_eq!(doubled.feature_vector(), Some(vec![2.0, 8.0]));
        assert_eq!(doubled.class_label(), Some("A"));
        assert_eq!(inst.feature_vector(), Some(vec![1.0, 4.0]));
    }
}
