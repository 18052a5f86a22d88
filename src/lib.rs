pub mod classifiers;
pub mod core;
pub mod data;
pub mod evaluation;
pub mod splits;
pub mod tasks;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
