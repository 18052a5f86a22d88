mod instance;
mod value;

pub use instance::Instance;
pub use value::Value;
