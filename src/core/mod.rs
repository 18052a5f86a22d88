pub mod attributes;
pub mod dataset;
pub mod error;
pub mod instances;
pub mod preprocessing;

pub use dataset::Dataset;
pub use error::DatasetError;
pub use preprocessing::Preprocessing;
