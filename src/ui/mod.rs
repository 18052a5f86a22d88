pub mod cli;
pub mod params;

pub use params::{KnnParams, ParamsError};
