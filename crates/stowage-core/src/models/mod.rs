pub mod file;
pub mod validation;

pub use file::{Dimensions, FileDescriptor};
pub use validation::{Rule, ValidationResult, Violation};
