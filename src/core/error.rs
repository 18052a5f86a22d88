use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("attribute '{attribute}' has {actual} values, expected {expected}")]
    RaggedAttributes {
        attribute: String,
        expected: usize,
        actual: usize,
    },

    #[error("dataset has no attributes, so it has no class attribute")]
    NoClassAttribute,

    #[error("class attribute '{name}' must be qualitative")]
    ClassAttributeNotQualitative { name: String },

    #[error("weight {weight} for attribute '{attribute}' is outside [0, 1]")]
    WeightOutOfRange { attribute: String, weight: f64 },

    #[error("attribute index {index} out of range for {count} attributes")]
    AttributeIndexOutOfRange { index: usize, count: usize },

    #[error("row index {index} out of range for {count} cases")]
    RowIndexOutOfRange { index: usize, count: usize },

    #[error("attribute '{attribute}' expects a {expected} value")]
    ValueTypeMismatch {
        attribute: String,
        expected: &'static str,
    },

    #[error("instance has {actual} values, dataset has {expected} attributes")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("expected {expected} weights, got {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },
}
