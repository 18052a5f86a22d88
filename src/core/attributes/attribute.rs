use super::{QualitativeAttribute, QuantitativeAttribute};
use crate::core::error::DatasetError;
use crate::core::instances::Value;

/// A named, weighted column of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Quantitative(QuantitativeAttribute),
    Qualitative(QualitativeAttribute),
}

impl Attribute {
    pub fn quantitative(name: impl Into<String>, values: Vec<f64>) -> Attribute {
        Attribute::Quantitative(QuantitativeAttribute::with_values(name.into(), values))
    }

    pub fn qualitative<S: Into<String>>(name: impl Into<String>, values: Vec<S>) -> Attribute {
        Attribute::Qualitative(QualitativeAttribute::with_values(
            name.into(),
            values.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn name(&self) -> &str {
        match self {
            Attribute::Quantitative(a) => &a.name,
            Attribute::Qualitative(a) => &a.name,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Attribute::Quantitative(a) => a.weight,
            Attribute::Qualitative(a) => a.weight,
        }
    }

    /// Sets the weight; only values in [0, 1] are accepted.
    pub fn set_weight(&mut self, weight: f64) -> Result<(), DatasetError> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(DatasetError::WeightOutOfRange {
                attribute: self.name().to_string(),
                weight,
            });
        }
        match self {
            Attribute::Quantitative(a) => a.weight = weight,
            Attribute::Qualitative(a) => a.weight = weight,
        }
        Ok(())
    }

    pub fn with_weight(mut self, weight: f64) -> Result<Attribute, DatasetError> {
        self.set_weight(weight)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        match self {
            Attribute::Quantitative(a) => a.values.len(),
            Attribute::Qualitative(a) => a.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_qualitative(&self) -> bool {
        matches!(self, Attribute::Qualitative(_))
    }

    pub fn as_qualitative(&self) -> Option<&QualitativeAttribute> {
        match self {
            Attribute::Qualitative(a) => Some(a),
            Attribute::Quantitative(_) => None,
        }
    }

    pub fn as_quantitative(&self) -> Option<&QuantitativeAttribute> {
        match self {
            Attribute::Quantitative(a) => Some(a),
            Attribute::Qualitative(_) => None,
        }
    }

    pub fn value_at_index(&self, index: usize) -> Option<Value> {
        match self {
            Attribute::Quantitative(a) => a.values.get(index).map(|x| Value::Number(*x)),
            Attribute::Qualitative(a) => a.values.get(index).map(|s| Value::Label(s.clone())),
        }
    }

    pub fn push_value(&mut self, value: Value) -> Result<(), DatasetError> {
        match (self, value) {
            (Attribute::Quantitative(a), Value::Number(x)) => a.values.push(x),
            (Attribute::Qualitative(a), Value::Label(s)) => a.values.push(s),
            (attr, _) => {
                let expected = if attr.is_qualitative() { "qualitative" } else { "quantitative" };
                return Err(DatasetError::ValueTypeMismatch {
                    attribute: attr.name().to_string(),
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Same name, type and weight, no values.
    pub fn empty_like(&self) -> Attribute {
        match self {
            Attribute::Quantitative(a) => Attribute::Quantitative(QuantitativeAttribute {
                name: a.name.clone(),
                weight: a.weight,
                values: Vec::new(),
            }),
            Attribute::Qualitative(a) => Attribute::Qualitative(QualitativeAttribute {
                name: a.name.clone(),
                weight: a.weight,
                values: Vec::new(),
            }),
        }
    }

    /// Copies the values at `rows`, in that order, into a new column.
    pub(crate) fn select(&self, rows: &[usize]) -> Attribute {
        match self {
            Attribute::Quantitative(a) => Attribute::Quantitative(QuantitativeAttribute {
                name: a.name.clone(),
                weight: a.weight,
                values: rows.iter().map(|&i| a.values[i]).collect(),
            }),
            Attribute::Qualitative(a) => Attribute::Qualitative(QualitativeAttribute {
                name: a.name.clone(),
                weight: a.weight,
                values: rows.iter().map(|&i| a.values[i].clone()).collect(),
            }),
        }
    }
}
