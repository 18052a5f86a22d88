mod attribute;
mod qualitative_attribute;
mod quantitative_attribute;

pub use attribute::Attribute;
pub use qualitative_attribute::QualitativeAttribute;
pub use quantitative_attribute::QuantitativeAttribute;

pub const DEFAULT_WEIGHT: f64 = 1.0;
