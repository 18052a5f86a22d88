use crate::core::attributes::{Attribute, QualitativeAttribute};
use crate::core::error::DatasetError;
use crate::core::instances::{Instance, Value};
use crate::core::preprocessing::Preprocessing;
use std::fmt;

/// Columnar table of weighted attributes. The last attribute is the class.
#[derive(Clone, PartialEq)]
pub struct Dataset {
    name: String,
    attributes: Vec<Attribute>,
    preprocessing: Preprocessing,
}

impl Dataset {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Result<Dataset, DatasetError> {
        if let Some(first) = attributes.first() {
            let expected = first.len();
            if let Some(bad) = attributes.iter().find(|a| a.len() != expected) {
                return Err(DatasetError::RaggedAttributes {
                    attribute: bad.name().to_string(),
                    expected,
                    actual: bad.len(),
                });
            }
        }
        Ok(Dataset {
            name: name.into(),
            attributes,
            preprocessing: Preprocessing::None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preprocessing(&self) -> Preprocessing {
        self.preprocessing
    }

    pub fn with_preprocessing(mut self, preprocessing: Preprocessing) -> Dataset {
        self.preprocessing = preprocessing;
        self
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn number_of_cases(&self) -> usize {
        self.attributes.first().map_or(0, Attribute::len)
    }

    pub fn is_empty(&self) -> bool {
        self.number_of_cases() == 0
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }

    pub fn class_index(&self) -> Option<usize> {
        self.attributes.len().checked_sub(1)
    }

    pub fn class_attribute(&self) -> Result<&QualitativeAttribute, DatasetError> {
        let last = self.attributes.last().ok_or(DatasetError::NoClassAttribute)?;
        last.as_qualitative()
            .ok_or_else(|| DatasetError::ClassAttributeNotQualitative {
                name: last.name().to_string(),
            })
    }

    /// Distinct class labels in first-seen order.
    pub fn classes(&self) -> Result<Vec<String>, DatasetError> {
        Ok(self.class_attribute()?.distinct_labels())
    }

    /// Per-attribute weights in attribute order, class attribute included.
    pub fn weights(&self) -> Vec<f64> {
        self.attributes.iter().map(Attribute::weight).collect()
    }

    /// Weights of every attribute but the class.
    pub fn feature_weights(&self) -> Vec<f64> {
        let mut w = self.weights();
        w.pop();
        w
    }

    /// Weights of the non-class quantitative attributes, in attribute order.
    /// These line up one to one with [`Instance::feature_vector`].
    pub fn numeric_feature_weights(&self) -> Vec<f64> {
        let features = self.class_index().map_or(&[][..], |c| &self.attributes[..c]);
        features
            .iter()
            .filter(|a| !a.is_qualitative())
            .map(Attribute::weight)
            .collect()
    }

    pub fn set_weight(&mut self, index: usize, weight: f64) -> Result<(), DatasetError> {
        let count = self.attributes.len();
        self.attributes
            .get_mut(index)
            .ok_or(DatasetError::AttributeIndexOutOfRange { index, count })?
            .set_weight(weight)
    }

    /// Sets every weight at once; nothing changes if any weight is rejected.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<(), DatasetError> {
        if weights.len() != self.attributes.len() {
            return Err(DatasetError::WeightCountMismatch {
                expected: self.attributes.len(),
                actual: weights.len(),
            });
        }
        let mut updated = self.attributes.clone();
        for (attr, &w) in updated.iter_mut().zip(weights) {
            attr.set_weight(w)?;
        }
        self.attributes = updated;
        Ok(())
    }

    pub fn instance(&self, row: usize) -> Option<Instance> {
        if row >= self.number_of_cases() {
            return None;
        }
        let values = self
            .attributes
            .iter()
            .filter_map(|a| a.value_at_index(row))
            .collect();
        Some(Instance::new(values))
    }

    pub fn instances(&self) -> impl Iterator<Item = Instance> + '_ {
        (0..self.number_of_cases()).filter_map(move |row| self.instance(row))
    }

    /// Appends a row. The row is rejected as a whole on arity or type mismatch.
    pub fn push_instance(&mut self, instance: &Instance) -> Result<(), DatasetError> {
        if instance.number_of_values() != self.attributes.len() {
            return Err(DatasetError::ArityMismatch {
                expected: self.attributes.len(),
                actual: instance.number_of_values(),
            });
        }
        for (attr, value) in self.attributes.iter().zip(instance.values()) {
            let fits = match value {
                Value::Number(_) => !attr.is_qualitative(),
                Value::Label(_) => attr.is_qualitative(),
            };
            if !fits {
                return Err(DatasetError::ValueTypeMismatch {
                    attribute: attr.name().to_string(),
                    expected: if attr.is_qualitative() { "qualitative" } else { "quantitative" },
                });
            }
        }
        for (attr, value) in self.attributes.iter_mut().zip(instance.values()) {
            attr.push_value(value.clone())?;
        }
        Ok(())
    }

    /// Same name, schema, weights and preprocessing marker; zero rows.
    pub fn empty_like(&self) -> Dataset {
        Dataset {
            name: self.name.clone(),
            attributes: self.attributes.iter().map(Attribute::empty_like).collect(),
            preprocessing: self.preprocessing,
        }
    }

    /// Copies the given rows, in the given order, into a new dataset.
    pub fn select_rows(&self, rows: &[usize]) -> Result<Dataset, DatasetError> {
        let count = self.number_of_cases();
        if let Some(&index) = rows.iter().find(|&&r| r >= count) {
            return Err(DatasetError::RowIndexOutOfRange { index, count });
        }
        Ok(Dataset {
            name: self.name.clone(),
            attributes: self.attributes.iter().map(|a| a.select(rows)).collect(),
            preprocessing: self.preprocessing,
        })
    }

    pub(crate) fn map_attributes<F>(&self, f: F) -> Dataset
    where
        F: FnMut(&Attribute) -> Attribute,
    {
        Dataset {
            name: self.name.clone(),
            attributes: self.attributes.iter().map(f).collect(),
            preprocessing: self.preprocessing,
        }
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("name", &self.name)
            .field("n_attributes", &self.attributes.len())
            .field("n_cases", &self.number_of_cases())
            .field("preprocessing", &self.preprocessing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Dataset {
        Dataset::new(
            "points",
            vec![
                Attribute::quantitative("x", vec![1.0, 2.0, 3.0]),
                Attribute::quantitative("y", vec![1.0, 2.0, 3.0]),
                Attribute::qualitative("class", vec!["A", "B", "A"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let err = Dataset::new(
            "bad",
            vec![
                Attribute::quantitative("x", vec![1.0, 2.0]),
                Attribute::qualitative("class", vec!["A"]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DatasetError::RaggedAttributes {
                attribute: "class".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn no_attributes_means_no_rows() {
        let ds = Dataset::new("empty", vec![]).unwrap();
        assert_eq!(ds.number_of_cases(), 0);
        assert_eq!(ds.classes().unwrap_err(), DatasetError::NoClassAttribute);
    }

    #[test]
    fn classes_require_qualitative_last_attribute() {
        let ds = Dataset::new("num", vec![Attribute::quantitative("y", vec![1.0])]).unwrap();
        assert!(matches!(
            ds.classes(),
            Err(DatasetError::ClassAttributeNotQualitative { .. })
        ));
        assert_eq!(points().classes().unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn instance_materializes_row() {
        let ds = points();
        let inst = ds.instance(1).unwrap();
        assert_eq!(inst.feature_vector(), Some(vec![2.0, 2.0]));
        assert_eq!(inst.class_label(), Some("B"));
        assert!(ds.instance(3).is_none());
        assert_eq!(ds.instances().count(), 3);
    }

    #[test]
    fn weights_include_class_attribute() {
        let mut ds = points();
        ds.set_weight(1, 0.5).unwrap();
        assert_eq!(ds.weights(), vec![1.0, 0.5, 1.0]);
        assert_eq!(ds.feature_weights(), vec![1.0, 0.5]);
        assert!(ds.set_weight(7, 0.5).is_err());
    }

    #[test]
    fn numeric_feature_weights_skip_labels_and_class() {
        let mut ds = Dataset::new(
            "mixed",
            vec![
                Attribute::quantitative("x", vec![1.0]),
                Attribute::qualitative("color", vec!["red"]),
                Attribute::quantitative("y", vec![2.0]),
                Attribute::qualitative("class", vec!["A"]),
            ],
        )
        .unwrap();
        ds.set_weights(&[0.5, 0.9, 0.25, 1.0]).unwrap();
        assert_eq!(ds.feature_weights(), vec![0.5, 0.9, 0.25]);
        assert_eq!(ds.numeric_feature_weights(), vec![0.5, 0.25]);
        let features = ds.instance(0).unwrap().feature_vector().unwrap();
        assert_eq!(features.len(), ds.numeric_feature_weights().len());
        assert!(Dataset::new("none", vec![]).unwrap().numeric_feature_weights().is_empty());
    }

    #[test]
    fn set_weights_is_all_or_nothing() {
        let mut ds = points();
        assert!(ds.set_weights(&[0.5, 2.0, 1.0]).is_err());
        assert_eq!(ds.weights(), vec![1.0, 1.0, 1.0]);
        assert!(ds.set_weights(&[0.5]).is_err());
        ds.set_weights(&[0.5, 0.0, 1.0]).unwrap();
        assert_eq!(ds.weights(), vec![0.5, 0.0, 1.0]);
    }

    #[test]
    fn push_instance_rejects_bad_rows_whole() {
        let mut ds = points().empty_like();
        let bad = Instance::new(vec![1.0.into(), "oops".into(), "A".into()]);
        assert!(ds.push_instance(&bad).is_err());
        assert_eq!(ds.number_of_cases(), 0);
        assert!(ds.attributes().iter().all(Attribute::is_empty));

        let short = Instance::new(vec![1.0.into()]);
        assert!(matches!(
            ds.push_instance(&short),
            Err(DatasetError::ArityMismatch { expected: 3, actual: 1 })
        ));

        let good = Instance::new(vec![1.0.into(), 2.0.into(), "A".into()]);
        ds.push_instance(&good).unwrap();
        assert_eq!(ds.instance(0), Some(good));
    }

    #[test]
    fn select_rows_copies_and_keeps_marker() {
        let ds = points().with_preprocessing(Preprocessing::Normalized);
        let sub = ds.select_rows(&[2, 0]).unwrap();
        assert_eq!(sub.number_of_cases(), 2);
        assert_eq!(sub.instance(0), ds.instance(2));
        assert_eq!(sub.preprocessing(), Preprocessing::Normalized);
        assert!(ds.select_rows(&[3]).is_err());
    }
}
